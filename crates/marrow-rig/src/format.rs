//! Rig loading and saving (TOML)

use crate::constraint::{ConstraintChannel, TransformKind};
use crate::rig::Rig;
use crate::space::SpaceRef;
use log::warn;
use marrow_core::{Result, Transform};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// TOML file format for a rig definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigFile {
    pub rig: RigMeta,
    #[serde(default, rename = "node")]
    pub nodes: Vec<NodeDef>,
    #[serde(default, rename = "constraint")]
    pub constraints: Vec<ConstraintDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigMeta {
    pub name: String,
}

/// One `[[node]]` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDef {
    pub name: String,
    #[serde(default)]
    pub parent: SpaceRef,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// One `[[constraint]]` entry; each blended entry is its own record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintDef {
    pub node: String,
    pub channel: ConstraintChannel,
    #[serde(default = "TransformKind::absolute")]
    pub kind: TransformKind,
    #[serde(default)]
    pub parent_space: SpaceRef,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

impl TransformKind {
    fn absolute() -> Self {
        Self::Absolute
    }
}

fn default_weight() -> f32 {
    1.0
}

/// Load a rig from a TOML file
pub fn load_rig<P: AsRef<Path>>(path: P) -> Result<Rig> {
    let content = fs::read_to_string(path)?;
    load_rig_string(&content)
}

/// Load a rig from a TOML string.
///
/// Definitions are replayed through the normal mutation API, so files get
/// the same semantics as interactive authoring: duplicate node names are
/// dropped (with a warning) and unresolvable parent spaces coerce to World.
/// Nodes are added before any constraint, matching the bulk-population
/// ordering.
pub fn load_rig_string(content: &str) -> Result<Rig> {
    let file: RigFile = toml::from_str(content)?;
    let mut rig = Rig::new();

    for def in &file.nodes {
        if !rig.add_node(def.name.clone(), def.parent.clone(), def.transform) {
            warn!("rig '{}': duplicate node '{}' dropped", file.rig.name, def.name);
            continue;
        }
        if let Some(display_name) = &def.display_name {
            let index = rig.node_count() - 1;
            rig.nodes[index].display_name = Some(display_name.clone());
        }
    }

    for def in &file.constraints {
        rig.add_constraint(
            &def.node,
            def.channel,
            def.kind,
            def.parent_space.clone(),
            def.weight,
        );
    }

    Ok(rig)
}

/// Save a rig to a TOML file
pub fn save_rig<P: AsRef<Path>>(path: P, rig: &Rig, name: impl Into<String>) -> Result<()> {
    let content = save_rig_string(rig, name)?;
    fs::write(path, content)?;
    Ok(())
}

/// Serialize a rig to a TOML string
pub fn save_rig_string(rig: &Rig, name: impl Into<String>) -> Result<String> {
    let mut file = RigFile {
        rig: RigMeta { name: name.into() },
        nodes: Vec::new(),
        constraints: Vec::new(),
    };

    for node in rig.nodes() {
        file.nodes.push(NodeDef {
            name: node.name.clone(),
            parent: node.parent.clone(),
            transform: node.transform,
            display_name: node.display_name.clone(),
        });
    }

    for base in rig.transform_bases() {
        for (channel, slot) in [
            (ConstraintChannel::Translation, &base.translation),
            (ConstraintChannel::Orientation, &base.orientation),
        ] {
            for entry in slot {
                file.constraints.push(ConstraintDef {
                    node: base.node.clone(),
                    channel,
                    kind: entry.kind,
                    parent_space: entry.parent_space.clone(),
                    weight: entry.weight,
                });
            }
        }
    }

    let content = toml::to_string_pretty(&file)?;
    Ok(content)
}
