//! Drop-target resolution: pointer position → best reparenting path.
//!
//! Scans the view forest for the candidate parent closest (taxicab) to the
//! pointer, constrained to a horizontal band: the pointer must sit strictly
//! more than `drop_min_dx` and strictly less than `drop_max_dx` to the
//! right of the candidate, so a drop reads as "make me this node's child"
//! and distant nodes never capture the drag. The winning path gets `0`
//! appended — the dragged tree becomes the first child.
//!
//! Placeholder nodes (`drop_preview`) are skipped together with their
//! subtree and do not consume a child index, so returned paths are valid
//! against the working forest the placeholder was injected into.

use mm_core::path::NodePath;
use mm_core::{CanvasView, MapConfig, Point, ViewNode};

/// Find the best insertion path for a drag hovering at `pointer`, or `None`
/// when nothing is in reach (release then creates a new top-level tree).
pub fn drop_target(view: &CanvasView, pointer: Point, config: &MapConfig) -> Option<NodePath> {
    let mut best: Option<(f32, NodePath)> = None;
    let mut path = NodePath::new();
    for (index, root) in view
        .children
        .iter()
        .filter(|c| !c.drop_preview)
        .enumerate()
    {
        path.push(index);
        scan(root, &mut path, pointer, config, &mut best);
        path.pop();
    }
    best.map(|(_, path)| path)
}

fn scan(
    node: &ViewNode,
    path: &mut NodePath,
    pointer: Point,
    config: &MapConfig,
    best: &mut Option<(f32, NodePath)>,
) {
    // closer is better; strict comparison keeps the first of equals
    let score = -pointer.taxicab(node.coord);
    let dx = pointer.x - node.coord.x;
    let eligible = dx > config.drop_min_dx && dx < config.drop_max_dx;
    if eligible && best.as_ref().is_none_or(|(top, _)| score > *top) {
        let mut target = path.clone();
        target.push(0);
        *best = Some((score, target));
    }

    for (index, child) in node
        .children
        .iter()
        .filter(|c| !c.drop_preview)
        .enumerate()
    {
        path.push(index);
        scan(child, path, pointer, config, best);
        path.pop();
    }
}
