//! Rig node definitions

use crate::space::SpaceRef;
use marrow_core::Transform;
use serde::{Deserialize, Serialize};

/// A named point in the rig hierarchy with a rest-pose transform
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    /// Structural parent; not validated against the node list at insert time
    pub parent: SpaceRef,
    pub transform: Transform,
    /// Editor-facing label; node identity is always `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Node {
    pub fn new(name: impl Into<String>, parent: SpaceRef, transform: Transform) -> Self {
        Self {
            name: name.into(),
            parent,
            transform,
            display_name: None,
        }
    }
}
