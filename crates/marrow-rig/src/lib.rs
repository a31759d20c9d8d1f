//! Marrow Rig - Retained-mode rig graph
//!
//! This crate provides the rig data model that an animation editor mutates
//! and a runtime queries:
//! - `Rig` - insertion-ordered named nodes plus per-node transform constraints
//! - `SkeletonDesc` - the external skeleton description rigs are built from
//! - TOML rig-file load/save
//! - Referential-integrity reporting for tooling

mod constraint;
mod format;
mod integrity;
mod node;
mod rig;
mod skeleton;
mod space;

pub use constraint::{ConstraintChannel, TransformBase, TransformConstraint, TransformKind};
pub use format::{
    load_rig, load_rig_string, save_rig, save_rig_string, ConstraintDef, NodeDef, RigFile, RigMeta,
};
pub use integrity::{check_rig, IntegrityIssue, IntegrityReport};
pub use node::Node;
pub use rig::Rig;
pub use skeleton::{BoneDesc, SkeletonDesc};
pub use space::SpaceRef;
