//! External skeleton description consumed when bulk-populating a rig

use marrow_core::Transform;
use serde::{Deserialize, Serialize};

/// One bone of a skeleton description: a name, an optional parent index, and
/// a parent-space rest transform
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneDesc {
    pub name: String,
    pub parent: Option<usize>,
    pub local_transform: Transform,
}

/// An ordered bone hierarchy, stored parents-before-children.
///
/// This is the collaborator boundary: importers and editor code produce a
/// `SkeletonDesc`, and `Rig::create_from_skeleton` consumes it. A parent
/// index at or after its child is treated as unparented when composing the
/// rest pose.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonDesc {
    bones: Vec<BoneDesc>,
}

impl SkeletonDesc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bone and return its index
    pub fn add_bone(
        &mut self,
        name: impl Into<String>,
        parent: Option<usize>,
        local_transform: Transform,
    ) -> usize {
        self.bones.push(BoneDesc {
            name: name.into(),
            parent,
            local_transform,
        });
        self.bones.len() - 1
    }

    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    pub fn bone(&self, index: usize) -> Option<&BoneDesc> {
        self.bones.get(index)
    }

    pub fn bone_name(&self, index: usize) -> Option<&str> {
        self.bones.get(index).map(|b| b.name.as_str())
    }

    pub fn find_bone(&self, name: &str) -> Option<usize> {
        self.bones.iter().position(|b| b.name == name)
    }

    pub fn bones(&self) -> &[BoneDesc] {
        &self.bones
    }

    /// Compose local rest transforms down the hierarchy into component-space
    /// transforms, one per bone.
    ///
    /// Bones are parents-before-children, so a single forward pass suffices:
    /// `global[i] = global[parent[i]] * local[i]`.
    pub fn component_space_rest_pose(&self) -> Vec<Transform> {
        let mut globals: Vec<Transform> = Vec::with_capacity(self.bones.len());

        for (index, bone) in self.bones.iter().enumerate() {
            let global = match bone.parent {
                Some(parent) if parent < index => globals[parent].mul_transform(&bone.local_transform),
                _ => bone.local_transform,
            };
            globals.push(global);
        }

        globals
    }
}
