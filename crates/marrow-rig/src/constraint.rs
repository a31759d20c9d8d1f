//! Transform constraint records

use crate::space::SpaceRef;
use serde::{Deserialize, Serialize};

/// Which constraint slot of a node an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintChannel {
    Translation,
    Orientation,
}

/// How a constrained transform relates to its parent space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    Absolute,
    Relative,
}

/// One weighted parent-space reference within a constraint slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformConstraint {
    pub kind: TransformKind,
    pub parent_space: SpaceRef,
    /// Blend weight in [0, 1]; consumers combine multiple entries by weight
    pub weight: f32,
}

/// The constraint record owned by one node: an ordered entry list per channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformBase {
    pub node: String,
    #[serde(default)]
    pub translation: Vec<TransformConstraint>,
    #[serde(default)]
    pub orientation: Vec<TransformConstraint>,
}

impl TransformBase {
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            translation: Vec::new(),
            orientation: Vec::new(),
        }
    }

    pub fn slot(&self, channel: ConstraintChannel) -> &[TransformConstraint] {
        match channel {
            ConstraintChannel::Translation => &self.translation,
            ConstraintChannel::Orientation => &self.orientation,
        }
    }

    pub fn slot_mut(&mut self, channel: ConstraintChannel) -> &mut Vec<TransformConstraint> {
        match channel {
            ConstraintChannel::Translation => &mut self.translation,
            ConstraintChannel::Orientation => &mut self.orientation,
        }
    }
}
