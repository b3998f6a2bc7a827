//! Structural edit operations over the forest.
//!
//! Every user-visible mutation — label change, expand/collapse toggle,
//! resize, structural drop — funnels through [`apply_edit`] as one
//! [`EditOp`], producing a new forest for the history to commit. The
//! operations never touch the input forest; failures leave the caller
//! holding its prior state.

use mm_core::path::{self, NodePath};
use mm_core::{Canvas, PathError, TreeNode};
use std::rc::Rc;

/// One structural edit, addressed by path into the current forest.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Replace the node at `path` wholesale.
    Set { path: NodePath, node: TreeNode },
    /// Insert as a sibling at the position named by `path`'s last index.
    Insert { path: NodePath, node: Rc<TreeNode> },
    /// Remove the node at `path` with its subtree.
    Delete { path: NodePath },
    /// Append as the last child of the node at `path`.
    Append { path: NodePath, node: Rc<TreeNode> },
}

/// Apply one edit, returning the resulting forest.
pub fn apply_edit(canvas: &Canvas, op: EditOp) -> Result<Canvas, PathError> {
    match op {
        EditOp::Set { path, node } => path::set(canvas, &path, node),
        EditOp::Insert { path, node } => path::insert(canvas, &path, node),
        EditOp::Delete { path } => path::delete(canvas, &path),
        EditOp::Append { path, node } => path::append(canvas, &path, node),
    }
}

/// Replace the label of the node at `path`.
pub fn rename(canvas: &Canvas, path: &NodePath, label: &str) -> Result<Canvas, PathError> {
    path::over(canvas, path, |n| {
        let mut n = n.clone();
        n.label = label.to_owned();
        n
    })
}

/// Flip the expand/collapse state of the node at `path`.
pub fn toggle_expanded(canvas: &Canvas, path: &NodePath) -> Result<Canvas, PathError> {
    path::over(canvas, path, |n| {
        let mut n = n.clone();
        n.expanded = !n.expanded;
        n
    })
}

/// Set (or clear) the fixed wrap width of the node at `path`.
pub fn set_fixed_width(
    canvas: &Canvas,
    path: &NodePath,
    width: Option<f32>,
) -> Result<Canvas, PathError> {
    path::over(canvas, path, |n| {
        let mut n = n.clone();
        n.fixed_width = width;
        n
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mm_core::{Direction, Point};
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    fn sample() -> Canvas {
        let mut root = TreeNode::new_root("Root", Point::ORIGIN);
        root.children = vec![Rc::new(TreeNode::new("a", Direction::Right))];
        Canvas::new(vec![Rc::new(root)])
    }

    #[test]
    fn rename_touches_only_the_label() {
        let canvas = sample();
        let edited = rename(&canvas, &smallvec![0, 0], "renamed").unwrap();
        let node = mm_core::path::get(&edited, &smallvec![0, 0]).unwrap();
        assert_eq!(node.label, "renamed");
        assert_eq!(node.direction, Direction::Right);
        assert!(node.expanded);
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let canvas = sample();
        let once = toggle_expanded(&canvas, &smallvec![0, 0]).unwrap();
        assert!(!mm_core::path::get(&once, &smallvec![0, 0]).unwrap().expanded);
        let twice = toggle_expanded(&once, &smallvec![0, 0]).unwrap();
        assert_eq!(twice, canvas);
    }

    #[test]
    fn apply_edit_surfaces_stale_paths() {
        let canvas = sample();
        let result = apply_edit(
            &canvas,
            EditOp::Delete {
                path: smallvec![0, 7],
            },
        );
        assert!(result.is_err());
        // failed edit leaves the input untouched
        assert_eq!(canvas.children[0].children.len(), 1);
    }

    #[test]
    fn set_fixed_width_round_trips() {
        let canvas = sample();
        let fixed = set_fixed_width(&canvas, &smallvec![0, 0], Some(120.0)).unwrap();
        assert_eq!(
            mm_core::path::get(&fixed, &smallvec![0, 0]).unwrap().fixed_width,
            Some(120.0)
        );
        let cleared = set_fixed_width(&fixed, &smallvec![0, 0], None).unwrap();
        assert_eq!(cleared, canvas);
    }
}
