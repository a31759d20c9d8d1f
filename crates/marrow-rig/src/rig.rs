//! The rig graph: insertion-ordered nodes plus per-node transform constraints

use crate::constraint::{ConstraintChannel, TransformBase, TransformConstraint, TransformKind};
use crate::node::Node;
use crate::skeleton::SkeletonDesc;
use crate::space::SpaceRef;
use log::{debug, warn};
use marrow_core::{MarrowError, Result, Transform};
use std::collections::BTreeMap;

/// The full collection of nodes and transform bases for one skeletal
/// hierarchy.
///
/// Mutation stays local and non-fatal: duplicate or missing names are
/// reported through `bool`/`Option` returns, never errors. Referential
/// integrity is deliberately not enforced here — `AddNode` accepts dangling
/// parents and `DeleteNode` does not cascade — so editors can stage partial
/// states; the `integrity` module reports violations for tooling that wants
/// the strict view.
///
/// Name lookups are linear scans. Rigs are authored at tens of nodes, so a
/// side map would cost more in bookkeeping than it saves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Rig {
    pub(crate) nodes: Vec<Node>,
    pub(crate) transform_bases: Vec<TransformBase>,
}

impl Rig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node. Returns false (leaving the rig unchanged) when the
    /// name is already taken. The parent is not validated: a dangling
    /// reference resolves like World at query time.
    pub fn add_node(&mut self, name: impl Into<String>, parent: SpaceRef, transform: Transform) -> bool {
        let name = name.into();
        if self.find_node(&name).is_some() {
            return false;
        }

        self.nodes.push(Node::new(name, parent, transform));
        true
    }

    /// Remove a node by name; returns whether removal occurred.
    ///
    /// Constraints referencing the node and children parented to it are left
    /// as-is; fixing them up is the caller's responsibility.
    pub fn delete_node(&mut self, name: &str) -> bool {
        match self.find_node(name) {
            Some(index) => {
                self.nodes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn find_node(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.name == name)
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn node_name(&self, index: usize) -> Option<&str> {
        self.nodes.get(index).map(|node| node.name.as_str())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The node's structural parent, or World when the node is absent or
    /// unparented.
    pub fn parent_node(&self, name: &str) -> SpaceRef {
        match self.find_node(name) {
            Some(index) => self.nodes[index].parent.clone(),
            None => SpaceRef::World,
        }
    }

    /// Record a constraint for `node` on the given channel, appending to the
    /// node's existing TransformBase (created on first use).
    ///
    /// A parent space that does not resolve to a node is coerced to World;
    /// callers wanting stricter behavior validate the name first. The weight
    /// is clamped into [0, 1].
    pub fn add_constraint(
        &mut self,
        node: &str,
        channel: ConstraintChannel,
        kind: TransformKind,
        parent_space: SpaceRef,
        weight: f32,
    ) {
        let parent_space = match parent_space {
            SpaceRef::Node(name) if self.find_node(&name).is_none() => {
                warn!("constraint on '{node}': parent space '{name}' not in rig, using world");
                SpaceRef::World
            }
            other => other,
        };

        let entry = TransformConstraint {
            kind,
            parent_space,
            weight: weight.clamp(0.0, 1.0),
        };

        match self.find_transform_base(node) {
            Some(index) => self.transform_bases[index].slot_mut(channel).push(entry),
            None => {
                let mut base = TransformBase::new(node);
                base.slot_mut(channel).push(entry);
                self.transform_bases.push(base);
            }
        }
    }

    pub fn transform_base_count(&self) -> usize {
        self.transform_bases.len()
    }

    pub fn transform_base(&self, index: usize) -> Option<&TransformBase> {
        self.transform_bases.get(index)
    }

    pub fn transform_bases(&self) -> &[TransformBase] {
        &self.transform_bases
    }

    pub fn find_transform_base(&self, node: &str) -> Option<usize> {
        self.transform_bases.iter().position(|base| base.node == node)
    }

    pub fn transform_base_by_node(&self, node: &str) -> Option<&TransformBase> {
        self.find_transform_base(node)
            .map(|index| &self.transform_bases[index])
    }

    /// Resolve the node index of the parent space referenced by one
    /// constraint entry.
    ///
    /// Returns `None` when the node, its TransformBase, the entry, or the
    /// referenced node is absent. World resolves to `None` as well, since
    /// World is not a node.
    pub fn transform_parent_node(
        &self,
        node_index: usize,
        channel: ConstraintChannel,
        entry: usize,
    ) -> Option<usize> {
        let node = self.nodes.get(node_index)?;
        let base = self.transform_base_by_node(&node.name)?;
        let constraint = base.slot(channel).get(entry)?;
        self.find_node(constraint.parent_space.node_name()?)
    }

    /// Bulk-populate from a skeleton description.
    ///
    /// `required` maps bone index to parent bone index (`None` for roots)
    /// over the caller-chosen subset of bones. Two passes: every required
    /// bone becomes a node carrying its component-space rest transform, and
    /// only once all nodes exist does each get an absolute weight-1.0
    /// Translation and Orientation constraint on its resolved parent (World
    /// for roots). Bone indices outside the skeleton are skipped.
    pub fn create_from_skeleton(
        &mut self,
        skeleton: &SkeletonDesc,
        required: &BTreeMap<usize, Option<usize>>,
    ) {
        if required.is_empty() {
            return;
        }

        let rest_pose = skeleton.component_space_rest_pose();

        for (&bone, &parent) in required {
            let Some(name) = skeleton.bone_name(bone) else {
                warn!("skeleton has no bone at index {bone}, skipping");
                continue;
            };

            let parent_ref = parent
                .and_then(|p| skeleton.bone_name(p))
                .map(SpaceRef::node)
                .unwrap_or(SpaceRef::World);

            self.add_node(name.to_string(), parent_ref, rest_pose[bone]);
        }

        for (&bone, &parent) in required {
            let Some(name) = skeleton.bone_name(bone) else {
                continue;
            };

            let parent_space = parent
                .and_then(|p| skeleton.bone_name(p))
                .map(SpaceRef::node)
                .unwrap_or(SpaceRef::World);

            self.add_constraint(
                name,
                ConstraintChannel::Translation,
                TransformKind::Absolute,
                parent_space.clone(),
                1.0,
            );
            self.add_constraint(
                &name,
                ConstraintChannel::Orientation,
                TransformKind::Absolute,
                parent_space,
                1.0,
            );
        }

        debug!(
            "populated rig from skeleton: {} nodes, {} transform bases",
            self.nodes.len(),
            self.transform_bases.len()
        );
    }

    /// Re-point the first Translation and Orientation entry of every
    /// TransformBase at World.
    ///
    /// Only the first entry per slot is rewritten; additional blended
    /// entries keep their parent spaces.
    pub fn set_all_constraints_to_world(&mut self) {
        for base in &mut self.transform_bases {
            if let Some(first) = base.translation.first_mut() {
                first.parent_space = SpaceRef::World;
            }
            if let Some(first) = base.orientation.first_mut() {
                first.parent_space = SpaceRef::World;
            }
        }
    }

    /// Re-point the first Translation and Orientation entry of every
    /// TransformBase at the node's structural parent.
    ///
    /// Same first-entry-only behavior as `set_all_constraints_to_world`.
    pub fn set_all_constraints_to_parents(&mut self) {
        let parents: Vec<SpaceRef> = self
            .transform_bases
            .iter()
            .map(|base| self.parent_node(&base.node))
            .collect();

        for (base, parent) in self.transform_bases.iter_mut().zip(parents) {
            if let Some(first) = base.translation.first_mut() {
                first.parent_space = parent.clone();
            }
            if let Some(first) = base.orientation.first_mut() {
                first.parent_space = parent;
            }
        }
    }

    /// Set a node's editor display name. Display names must be non-empty
    /// and unique across the rig.
    pub fn set_display_name(&mut self, index: usize, display_name: &str) -> Result<()> {
        if self.nodes.get(index).is_none() {
            return Err(MarrowError::NodeNotFound(format!("node index {index}")));
        }

        if display_name.is_empty() {
            return Err(MarrowError::ValidationError(
                "display name can't be empty".to_string(),
            ));
        }

        let taken = self.nodes.iter().enumerate().any(|(other, node)| {
            other != index && node.display_name.as_deref() == Some(display_name)
        });
        if taken {
            return Err(MarrowError::ValidationError(format!(
                "display name '{display_name}' is already in use"
            )));
        }

        self.nodes[index].display_name = Some(display_name.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marrow_core::Vec3;

    fn two_bone_skeleton() -> SkeletonDesc {
        let mut skeleton = SkeletonDesc::new();
        skeleton.add_bone(
            "A",
            None,
            Transform::from_translation(Vec3::new(0.0, 1.0, 0.0)),
        );
        skeleton.add_bone(
            "B",
            Some(0),
            Transform::from_translation(Vec3::new(0.0, 0.5, 0.0)),
        );
        skeleton
    }

    fn required_all(skeleton: &SkeletonDesc) -> BTreeMap<usize, Option<usize>> {
        (0..skeleton.bone_count())
            .map(|i| (i, skeleton.bone(i).unwrap().parent))
            .collect()
    }

    #[test]
    fn test_add_node_and_find_round_trip() {
        let mut rig = Rig::new();
        assert!(rig.add_node("Root", SpaceRef::World, Transform::IDENTITY));
        assert!(rig.add_node("Spine", SpaceRef::node("Root"), Transform::IDENTITY));
        assert!(rig.add_node("Head", SpaceRef::node("Spine"), Transform::IDENTITY));

        for (index, name) in ["Root", "Spine", "Head"].iter().enumerate() {
            assert_eq!(rig.find_node(name), Some(index));
            assert_eq!(rig.node_name(index), Some(*name));
        }
    }

    #[test]
    fn test_add_node_duplicate_is_rejected() {
        let mut rig = Rig::new();
        assert!(rig.add_node("Root", SpaceRef::World, Transform::IDENTITY));
        assert!(!rig.add_node("Root", SpaceRef::World, Transform::IDENTITY));
        assert_eq!(rig.node_count(), 1);
    }

    #[test]
    fn test_delete_node_absent_name_is_noop() {
        let mut rig = Rig::new();
        rig.add_node("Root", SpaceRef::World, Transform::IDENTITY);

        assert!(!rig.delete_node("Tail"));
        assert_eq!(rig.node_count(), 1);
        assert!(rig.delete_node("Root"));
        assert_eq!(rig.node_count(), 0);
    }

    #[test]
    fn test_delete_node_does_not_cascade() {
        let mut rig = Rig::new();
        rig.add_node("Root", SpaceRef::World, Transform::IDENTITY);
        rig.add_node("Spine", SpaceRef::node("Root"), Transform::IDENTITY);
        rig.add_constraint(
            "Spine",
            ConstraintChannel::Translation,
            TransformKind::Absolute,
            SpaceRef::node("Root"),
            1.0,
        );

        assert!(rig.delete_node("Root"));

        // Spine keeps its dangling parent and constraint; the caller fixes up
        assert_eq!(rig.parent_node("Spine"), SpaceRef::node("Root"));
        assert_eq!(rig.transform_base_count(), 1);
    }

    #[test]
    fn test_parent_node_falls_back_to_world() {
        let mut rig = Rig::new();
        rig.add_node("Root", SpaceRef::World, Transform::IDENTITY);

        assert_eq!(rig.parent_node("Root"), SpaceRef::World);
        assert_eq!(rig.parent_node("Missing"), SpaceRef::World);
    }

    #[test]
    fn test_node_index_out_of_range() {
        let rig = Rig::new();
        assert!(rig.node(3).is_none());
        assert!(rig.node_name(3).is_none());
    }

    #[test]
    fn test_add_constraint_unresolvable_parent_coerces_to_world() {
        let mut rig = Rig::new();
        rig.add_node("Root", SpaceRef::World, Transform::IDENTITY);
        rig.add_constraint(
            "Root",
            ConstraintChannel::Translation,
            TransformKind::Absolute,
            SpaceRef::node("NotThere"),
            1.0,
        );

        let base = rig.transform_base_by_node("Root").unwrap();
        assert_eq!(base.translation[0].parent_space, SpaceRef::World);
    }

    #[test]
    fn test_add_constraint_appends_for_blending() {
        let mut rig = Rig::new();
        rig.add_node("Root", SpaceRef::World, Transform::IDENTITY);
        rig.add_node("Spine", SpaceRef::node("Root"), Transform::IDENTITY);

        rig.add_constraint(
            "Spine",
            ConstraintChannel::Orientation,
            TransformKind::Absolute,
            SpaceRef::node("Root"),
            1.0,
        );
        rig.add_constraint(
            "Spine",
            ConstraintChannel::Orientation,
            TransformKind::Absolute,
            SpaceRef::World,
            0.25,
        );

        // one TransformBase per node, entries appended in order
        assert_eq!(rig.transform_base_count(), 1);
        let base = rig.transform_base_by_node("Spine").unwrap();
        assert_eq!(base.orientation.len(), 2);
        assert_eq!(base.orientation[0].parent_space, SpaceRef::node("Root"));
        assert_eq!(base.orientation[1].parent_space, SpaceRef::World);
        assert!(base.translation.is_empty());
    }

    #[test]
    fn test_add_constraint_clamps_weight() {
        let mut rig = Rig::new();
        rig.add_node("Root", SpaceRef::World, Transform::IDENTITY);
        rig.add_constraint(
            "Root",
            ConstraintChannel::Translation,
            TransformKind::Absolute,
            SpaceRef::World,
            3.0,
        );

        let base = rig.transform_base_by_node("Root").unwrap();
        assert_eq!(base.translation[0].weight, 1.0);
    }

    #[test]
    fn test_create_from_skeleton_two_pass() {
        let skeleton = two_bone_skeleton();
        let mut rig = Rig::new();
        rig.create_from_skeleton(&skeleton, &required_all(&skeleton));

        assert_eq!(rig.node_count(), 2);
        assert_eq!(rig.parent_node("B"), SpaceRef::node("A"));

        for (name, parent) in [("A", SpaceRef::World), ("B", SpaceRef::node("A"))] {
            let base = rig.transform_base_by_node(name).unwrap();
            for slot in [&base.translation, &base.orientation] {
                assert_eq!(slot.len(), 1);
                assert_eq!(slot[0].kind, TransformKind::Absolute);
                assert_eq!(slot[0].weight, 1.0);
                assert_eq!(slot[0].parent_space, parent);
            }
        }

        // rest pose is component-space, not the local bone offset
        let b = rig.node(rig.find_node("B").unwrap()).unwrap();
        assert_eq!(b.transform.translation, Vec3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn test_create_from_skeleton_skips_out_of_range_bones() {
        let skeleton = two_bone_skeleton();
        let mut required = required_all(&skeleton);
        required.insert(9, None);

        let mut rig = Rig::new();
        rig.create_from_skeleton(&skeleton, &required);
        assert_eq!(rig.node_count(), 2);
    }

    #[test]
    fn test_set_all_constraints_to_world_rewrites_first_entry_only() {
        let skeleton = two_bone_skeleton();
        let mut rig = Rig::new();
        rig.create_from_skeleton(&skeleton, &required_all(&skeleton));

        // second blended entry that the bulk pass must not touch
        rig.add_constraint(
            "B",
            ConstraintChannel::Translation,
            TransformKind::Absolute,
            SpaceRef::node("A"),
            0.5,
        );

        rig.set_all_constraints_to_world();

        for base in rig.transform_bases() {
            assert_eq!(base.translation[0].parent_space, SpaceRef::World);
            assert_eq!(base.orientation[0].parent_space, SpaceRef::World);
        }
        let b = rig.transform_base_by_node("B").unwrap();
        assert_eq!(b.translation[1].parent_space, SpaceRef::node("A"));
    }

    #[test]
    fn test_set_all_constraints_to_parents_matches_parent_node() {
        let skeleton = two_bone_skeleton();
        let mut rig = Rig::new();
        rig.create_from_skeleton(&skeleton, &required_all(&skeleton));
        rig.set_all_constraints_to_world();

        rig.set_all_constraints_to_parents();

        for base in rig.transform_bases() {
            let parent = rig.parent_node(&base.node);
            assert_eq!(base.translation[0].parent_space, parent);
            assert_eq!(base.orientation[0].parent_space, parent);
        }
    }

    #[test]
    fn test_transform_parent_node_resolves_constraint_space() {
        let skeleton = two_bone_skeleton();
        let mut rig = Rig::new();
        rig.create_from_skeleton(&skeleton, &required_all(&skeleton));

        let a = rig.find_node("A").unwrap();
        let b = rig.find_node("B").unwrap();

        // B's first constraint points at A; A's points at World (not a node)
        assert_eq!(
            rig.transform_parent_node(b, ConstraintChannel::Translation, 0),
            Some(a)
        );
        assert_eq!(
            rig.transform_parent_node(a, ConstraintChannel::Orientation, 0),
            None
        );
        // absent entry index
        assert_eq!(
            rig.transform_parent_node(b, ConstraintChannel::Translation, 4),
            None
        );
    }

    #[test]
    fn test_set_display_name_validation() {
        let mut rig = Rig::new();
        rig.add_node("Root", SpaceRef::World, Transform::IDENTITY);
        rig.add_node("Spine", SpaceRef::node("Root"), Transform::IDENTITY);

        rig.set_display_name(0, "Pelvis").unwrap();
        assert!(rig.set_display_name(1, "").is_err());
        assert!(rig.set_display_name(1, "Pelvis").is_err());
        assert!(rig.set_display_name(7, "Ok").is_err());
        rig.set_display_name(1, "Chest").unwrap();
        assert_eq!(rig.node(1).unwrap().display_name.as_deref(), Some("Chest"));
    }
}
