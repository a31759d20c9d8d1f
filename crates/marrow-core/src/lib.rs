//! Marrow Core - Foundational types for the Marrow rig toolkit
//!
//! This crate provides the core types that the other Marrow crates depend on:
//! - `Transform`, `Vec3`, `Quat` - Spatial types for rest poses
//! - Error types and Result alias

mod error;
mod types;

pub use error::{MarrowError, Result};
pub use types::{mat4_mul, Mat4, Quat, Transform, Vec3, MAT4_IDENTITY};
