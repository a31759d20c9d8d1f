//! Parent-space references

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parent-space reference: either the implicit World root or a named node.
///
/// World is not stored in a rig's node list, so a tagged variant (rather than
/// a reserved name string) keeps it from ever colliding with a user-named
/// node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceRef {
    World,
    Node(String),
}

impl SpaceRef {
    pub fn node(name: impl Into<String>) -> Self {
        Self::Node(name.into())
    }

    pub fn is_world(&self) -> bool {
        matches!(self, Self::World)
    }

    /// The referenced node name, or `None` for World
    pub fn node_name(&self) -> Option<&str> {
        match self {
            Self::World => None,
            Self::Node(name) => Some(name),
        }
    }
}

impl Default for SpaceRef {
    fn default() -> Self {
        Self::World
    }
}

impl fmt::Display for SpaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::World => write!(f, "<world>"),
            Self::Node(name) => write!(f, "{name}"),
        }
    }
}
