//! Rig inspection command

use anyhow::Result;
use marrow_rig::{load_rig, Rig, SpaceRef};

pub fn run(path: &str, show_constraints: bool) -> Result<()> {
    let rig = load_rig(path)?;

    println!("{} node(s), {} transform base(s)", rig.node_count(), rig.transform_base_count());
    println!();

    // roots are World-parented or dangling; both render at top level
    for node in rig.nodes() {
        let is_root = match &node.parent {
            SpaceRef::World => true,
            SpaceRef::Node(parent) => rig.find_node(parent).is_none(),
        };
        if is_root {
            print_subtree(&rig, &node.name, 0);
        }
    }

    if show_constraints {
        println!();
        for base in rig.transform_bases() {
            println!("[{}]", base.node);
            for (label, slot) in [("translation", &base.translation), ("orientation", &base.orientation)] {
                for entry in slot {
                    println!(
                        "  {label}: {:?} on {} (weight {})",
                        entry.kind, entry.parent_space, entry.weight
                    );
                }
            }
        }
    }

    Ok(())
}

fn print_subtree(rig: &Rig, name: &str, depth: usize) {
    // guard against parent cycles in hand-edited files
    if depth > rig.node_count() {
        return;
    }

    let Some(node) = rig.find_node(name).and_then(|index| rig.node(index)) else {
        return;
    };

    let label = match &node.display_name {
        Some(display) => format!("{name} ({display})"),
        None => name.to_string(),
    };
    println!("{:indent$}{label}", "", indent = depth * 2);

    for child in rig.nodes() {
        if child.parent == SpaceRef::node(name) {
            print_subtree(rig, &child.name, depth + 1);
        }
    }
}
