//! Referential-integrity reporting
//!
//! The mutation API is deliberately lenient: dangling parents are accepted
//! and deletions do not cascade. Tooling that wants the strict view runs
//! `check_rig` and reports the violations instead of the library silently
//! rejecting edits.

use crate::constraint::ConstraintChannel;
use crate::rig::Rig;
use crate::space::SpaceRef;
use std::fmt;

/// One referential-integrity violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// A node's structural parent names a node not present in the rig
    DanglingParent { node: String, parent: String },
    /// Following structural parents from this node never reaches World
    ParentCycle { node: String },
    /// A TransformBase's node is not present in the rig
    OrphanTransformBase { node: String },
    /// A constraint entry's parent space names a node not present in the rig
    UnknownParentSpace {
        node: String,
        channel: ConstraintChannel,
        parent_space: String,
    },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingParent { node, parent } => {
                write!(f, "node '{node}' is parented to missing node '{parent}'")
            }
            Self::ParentCycle { node } => {
                write!(f, "node '{node}' is part of a parent cycle")
            }
            Self::OrphanTransformBase { node } => {
                write!(f, "transform base for '{node}' has no matching node")
            }
            Self::UnknownParentSpace {
                node,
                channel,
                parent_space,
            } => {
                let channel = match channel {
                    ConstraintChannel::Translation => "translation",
                    ConstraintChannel::Orientation => "orientation",
                };
                write!(
                    f,
                    "{channel} constraint on '{node}' references missing node '{parent_space}'"
                )
            }
        }
    }
}

/// A complete integrity report
#[derive(Debug, Default)]
pub struct IntegrityReport {
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_clean() {
            "rig is consistent".to_string()
        } else {
            format!("{} integrity issue(s)", self.issues.len())
        }
    }
}

/// Check a rig's referential integrity.
///
/// Reports dangling structural parents, parent cycles, transform bases left
/// behind by node deletion, and constraint entries whose parent space no
/// longer resolves. World references are always valid.
pub fn check_rig(rig: &Rig) -> IntegrityReport {
    let mut report = IntegrityReport::default();

    for node in rig.nodes() {
        if let SpaceRef::Node(parent) = &node.parent {
            if rig.find_node(parent).is_none() {
                report.issues.push(IntegrityIssue::DanglingParent {
                    node: node.name.clone(),
                    parent: parent.clone(),
                });
            }
        }

        if has_parent_cycle(rig, &node.name) {
            report.issues.push(IntegrityIssue::ParentCycle {
                node: node.name.clone(),
            });
        }
    }

    for base in rig.transform_bases() {
        if rig.find_node(&base.node).is_none() {
            report.issues.push(IntegrityIssue::OrphanTransformBase {
                node: base.node.clone(),
            });
        }

        for (channel, slot) in [
            (ConstraintChannel::Translation, &base.translation),
            (ConstraintChannel::Orientation, &base.orientation),
        ] {
            for entry in slot {
                if let SpaceRef::Node(parent_space) = &entry.parent_space {
                    if rig.find_node(parent_space).is_none() {
                        report.issues.push(IntegrityIssue::UnknownParentSpace {
                            node: base.node.clone(),
                            channel,
                            parent_space: parent_space.clone(),
                        });
                    }
                }
            }
        }
    }

    report
}

/// Walk structural parents from `name`; a chain longer than the node count
/// can only mean a cycle. Dangling parents terminate the walk (they are
/// reported separately).
fn has_parent_cycle(rig: &Rig, name: &str) -> bool {
    let mut current = name.to_string();
    for _ in 0..rig.node_count() {
        match rig.parent_node(&current) {
            SpaceRef::World => return false,
            SpaceRef::Node(parent) => {
                if rig.find_node(&parent).is_none() {
                    return false;
                }
                current = parent;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::TransformKind;
    use crate::skeleton::SkeletonDesc;
    use marrow_core::Transform;
    use std::collections::BTreeMap;

    #[test]
    fn test_skeleton_built_rig_is_clean() {
        let mut skeleton = SkeletonDesc::new();
        skeleton.add_bone("A", None, Transform::IDENTITY);
        skeleton.add_bone("B", Some(0), Transform::IDENTITY);
        let required: BTreeMap<usize, Option<usize>> = [(0, None), (1, Some(0))].into();

        let mut rig = Rig::new();
        rig.create_from_skeleton(&skeleton, &required);

        let report = check_rig(&rig);
        assert!(report.is_clean(), "{:?}", report.issues);
    }

    #[test]
    fn test_dangling_parent_reported() {
        let mut rig = Rig::new();
        rig.add_node("Spine", SpaceRef::node("Root"), Transform::IDENTITY);

        let report = check_rig(&rig);
        assert_eq!(
            report.issues,
            vec![IntegrityIssue::DanglingParent {
                node: "Spine".to_string(),
                parent: "Root".to_string(),
            }]
        );
    }

    #[test]
    fn test_parent_cycle_reported() {
        let mut rig = Rig::new();
        rig.add_node("A", SpaceRef::node("B"), Transform::IDENTITY);
        rig.add_node("B", SpaceRef::node("A"), Transform::IDENTITY);

        let report = check_rig(&rig);
        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, IntegrityIssue::ParentCycle { node } if node == "A")));
        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i, IntegrityIssue::ParentCycle { node } if node == "B")));
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let mut rig = Rig::new();
        rig.add_node("A", SpaceRef::node("A"), Transform::IDENTITY);

        let report = check_rig(&rig);
        assert!(report
            .issues
            .contains(&IntegrityIssue::ParentCycle { node: "A".to_string() }));
    }

    #[test]
    fn test_deletion_leftovers_reported() {
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
        rig.add_constraint(
            "Root",
            ConstraintChannel::Translation,
            TransformKind::Absolute,
            SpaceRef::World,
            1.0,
        );
        rig.delete_node("Root");

        let report = check_rig(&rig);
        assert!(report
            .issues
            .contains(&IntegrityIssue::DanglingParent {
                node: "Spine".to_string(),
                parent: "Root".to_string(),
            }));
        assert!(report
            .issues
            .contains(&IntegrityIssue::OrphanTransformBase {
                node: "Root".to_string(),
            }));
        assert!(report.issues.contains(&IntegrityIssue::UnknownParentSpace {
            node: "Spine".to_string(),
            channel: ConstraintChannel::Translation,
            parent_space: "Root".to_string(),
        }));
    }
}
