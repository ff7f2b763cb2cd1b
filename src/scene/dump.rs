//! Scene-graph pretty printer for load-time debugging.
//!
//! Renders a subtree as an indented tree with each node's local position,
//! rotation (XYZ Euler), and scale at three decimal places — the fastest
//! way to spot a designer-authored scale or rotation surprise in a loaded
//! model.

use glam::Vec3;

use super::{NodeId, Scene};

/// Format a subtree as a multi-line tree listing.
#[must_use]
pub fn dump_tree(scene: &Scene, root: NodeId) -> String {
    let mut lines = Vec::new();
    dump_node(scene, root, true, "", &mut lines);
    lines.join("\n")
}

fn format_vec3(v: Vec3) -> String {
    format!("{:.3}, {:.3}, {:.3}", v.x, v.y, v.z)
}

fn dump_node(
    scene: &Scene,
    id: NodeId,
    is_last: bool,
    prefix: &str,
    lines: &mut Vec<String>,
) {
    let Some(node) = scene.node(id) else { return };

    let local_prefix = if prefix.is_empty() {
        ""
    } else if is_last {
        "└─"
    } else {
        "├─"
    };
    let name = if node.name.is_empty() {
        "*no-name*"
    } else {
        node.name.as_str()
    };
    lines.push(format!("{prefix}{local_prefix}{name} [{}]", node.kind.label()));

    let data_prefix = if node.children().is_empty() {
        if is_last {
            "    "
        } else {
            "|   "
        }
    } else if is_last {
        "  | "
    } else {
        "| | "
    };
    lines.push(format!(
        "{prefix}{data_prefix}  pos: {}",
        format_vec3(node.position)
    ));
    lines.push(format!(
        "{prefix}{data_prefix}  rot: {}",
        format_vec3(node.rotation_euler())
    ));
    lines.push(format!(
        "{prefix}{data_prefix}  scl: {}",
        format_vec3(node.scale)
    ));

    let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "| " });
    let children = node.children();
    for (index, &child) in children.iter().enumerate() {
        let last = index == children.len() - 1;
        dump_node(scene, child, last, &child_prefix, lines);
    }
}
