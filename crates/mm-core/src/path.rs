//! Path-addressed, copy-on-write forest editing.
//!
//! A [`NodePath`] is a sequence of child indices: `path[0]` indexes the
//! canvas' top-level children, each further index the `.children` of the
//! node reached so far. Paths are transient — they are recomputed against
//! the current forest after every edit and must never be stored across
//! renders.
//!
//! Every operation here returns a **new** canvas. Only the nodes on the
//! edited path are cloned; all off-path subtrees are shared by `Rc`
//! reference, so an edit allocates O(depth), not O(forest). Undo snapshots
//! and the drag preview both rely on old forests staying valid, which is
//! why nothing in this module ever mutates a reachable node.

use crate::error::PathError;
use crate::model::{Canvas, TreeNode};
use smallvec::SmallVec;
use std::rc::Rc;

/// Child-index sequence addressing one node within the forest.
pub type NodePath = SmallVec<[usize; 8]>;

/// Borrow the node at `path`.
pub fn get<'a>(canvas: &'a Canvas, path: &NodePath) -> Result<&'a Rc<TreeNode>, PathError> {
    let (&first, rest) = path.split_first().ok_or_else(|| PathError::not_found(path))?;
    let mut node = canvas
        .children
        .get(first)
        .ok_or_else(|| PathError::not_found(path))?;
    for &index in rest {
        node = node
            .children
            .get(index)
            .ok_or_else(|| PathError::not_found(path))?;
    }
    Ok(node)
}

/// Replace the node at `path` with `f(node)`.
pub fn over(
    canvas: &Canvas,
    path: &NodePath,
    f: impl FnOnce(&TreeNode) -> TreeNode,
) -> Result<Canvas, PathError> {
    if path.is_empty() {
        return Err(PathError::not_found(path));
    }
    Ok(Canvas::new(over_children(&canvas.children, path, path, f)?))
}

/// Replace the node at `path` wholesale.
pub fn set(canvas: &Canvas, path: &NodePath, node: TreeNode) -> Result<Canvas, PathError> {
    over(canvas, path, |_| node)
}

/// Insert `node` as a sibling at the position named by the final index of
/// `path` (later siblings shift right). An empty path appends to the
/// canvas' own top-level children.
pub fn insert(canvas: &Canvas, path: &NodePath, node: Rc<TreeNode>) -> Result<Canvas, PathError> {
    let Some((&index, parent)) = path.split_last() else {
        let mut children = canvas.children.clone();
        children.push(node);
        return Ok(Canvas::new(children));
    };

    if parent.is_empty() {
        if index > canvas.children.len() {
            return Err(PathError::not_found(path));
        }
        let mut children = canvas.children.clone();
        children.insert(index, node);
        return Ok(Canvas::new(children));
    }

    let parent_path: NodePath = parent.into();
    if index > get(canvas, &parent_path)?.children.len() {
        return Err(PathError::not_found(path));
    }
    over(canvas, &parent_path, move |p| {
        let mut p = p.clone();
        p.children.insert(index, node);
        p
    })
}

/// Remove the node at `path` together with its subtree.
pub fn delete(canvas: &Canvas, path: &NodePath) -> Result<Canvas, PathError> {
    let Some((&index, parent)) = path.split_last() else {
        return Err(PathError::not_found(path));
    };

    if parent.is_empty() {
        if index >= canvas.children.len() {
            return Err(PathError::not_found(path));
        }
        let mut children = canvas.children.clone();
        children.remove(index);
        return Ok(Canvas::new(children));
    }

    let parent_path: NodePath = parent.into();
    if index >= get(canvas, &parent_path)?.children.len() {
        return Err(PathError::not_found(path));
    }
    over(canvas, &parent_path, move |p| {
        let mut p = p.clone();
        p.children.remove(index);
        p
    })
}

/// Append `node` as the last child of the node at `path`. An empty path
/// appends a new top-level tree.
pub fn append(canvas: &Canvas, path: &NodePath, node: Rc<TreeNode>) -> Result<Canvas, PathError> {
    if path.is_empty() {
        let mut children = canvas.children.clone();
        children.push(node);
        return Ok(Canvas::new(children));
    }
    over(canvas, path, move |p| {
        let mut p = p.clone();
        p.children.push(node);
        p
    })
}

fn over_children<F>(
    children: &[Rc<TreeNode>],
    path: &[usize],
    full: &NodePath,
    f: F,
) -> Result<Vec<Rc<TreeNode>>, PathError>
where
    F: FnOnce(&TreeNode) -> TreeNode,
{
    // path is non-empty here; over() rejects the empty case up front.
    let (&index, rest) = match path.split_first() {
        Some(split) => split,
        None => return Err(PathError::not_found(full)),
    };
    let target = children
        .get(index)
        .ok_or_else(|| PathError::not_found(full))?;

    let replacement = if rest.is_empty() {
        Rc::new(f(target))
    } else {
        let mut node = (**target).clone();
        node.children = over_children(&target.children, rest, full, f)?;
        Rc::new(node)
    };

    let mut out = children.to_vec();
    out[index] = replacement;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::model::Direction;
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;

    fn leaf(label: &str) -> Rc<TreeNode> {
        Rc::new(TreeNode::new(label, Direction::Right))
    }

    fn sample() -> Canvas {
        let mut root = TreeNode::new_root("Root", Point::ORIGIN);
        let mut branch = TreeNode::new("branch", Direction::Right);
        branch.children = vec![leaf("x"), leaf("y")];
        root.children = vec![Rc::new(branch), leaf("solo")];
        Canvas::new(vec![Rc::new(root)])
    }

    #[test]
    fn get_resolves_nested_indices() {
        let canvas = sample();
        assert_eq!(get(&canvas, &smallvec![0]).unwrap().label, "Root");
        assert_eq!(get(&canvas, &smallvec![0, 0, 1]).unwrap().label, "y");
        assert!(get(&canvas, &smallvec![0, 2]).is_err());
        assert!(get(&canvas, &smallvec![1]).is_err());
    }

    #[test]
    fn set_then_get_roundtrips() {
        let canvas = sample();
        let path: NodePath = smallvec![0, 0, 1];
        let replacement = TreeNode::new("z", Direction::Right);
        let edited = set(&canvas, &path, replacement.clone()).unwrap();
        assert_eq!(**get(&edited, &path).unwrap(), replacement);
        // the input canvas is untouched
        assert_eq!(get(&canvas, &path).unwrap().label, "y");
    }

    #[test]
    fn set_of_own_value_is_identity() {
        let canvas = sample();
        let path: NodePath = smallvec![0, 0];
        let own = (**get(&canvas, &path).unwrap()).clone();
        assert_eq!(set(&canvas, &path, own).unwrap(), canvas);
    }

    #[test]
    fn edits_share_off_path_subtrees() {
        let canvas = sample();
        let edited = over(&canvas, &smallvec![0, 0, 0], |n| {
            let mut n = n.clone();
            n.label = "renamed".into();
            n
        })
        .unwrap();

        // sibling "solo" and cousin "y" are the same allocations
        assert!(Rc::ptr_eq(
            &canvas.children[0].children[1],
            &edited.children[0].children[1]
        ));
        assert!(Rc::ptr_eq(
            &canvas.children[0].children[0].children[1],
            &edited.children[0].children[0].children[1]
        ));
        // nodes on the path are fresh
        assert!(!Rc::ptr_eq(&canvas.children[0], &edited.children[0]));
    }

    #[test]
    fn insert_shifts_later_siblings() {
        let canvas = sample();
        let edited = insert(&canvas, &smallvec![0, 1], leaf("mid")).unwrap();
        let root = &edited.children[0];
        assert_eq!(root.children[0].label, "branch");
        assert_eq!(root.children[1].label, "mid");
        assert_eq!(root.children[2].label, "solo");
    }

    #[test]
    fn delete_undoes_insert() {
        let canvas = sample();
        let path: NodePath = smallvec![0, 1];
        let inserted = insert(&canvas, &path, leaf("mid")).unwrap();
        assert_eq!(delete(&inserted, &path).unwrap(), canvas);
    }

    #[test]
    fn empty_path_inserts_top_level() {
        let canvas = sample();
        let grown = insert(&canvas, &smallvec![], leaf("orphan")).unwrap();
        assert_eq!(grown.children.len(), 2);
        assert_eq!(grown.children[1].label, "orphan");

        assert!(delete(&canvas, &smallvec![]).is_err());
    }

    #[test]
    fn append_adds_last_child() {
        let canvas = sample();
        let edited = append(&canvas, &smallvec![0, 0], leaf("tail")).unwrap();
        let branch = &edited.children[0].children[0];
        assert_eq!(branch.children.len(), 3);
        assert_eq!(branch.children[2].label, "tail");
    }

    #[test]
    fn out_of_range_insert_is_an_error() {
        let canvas = sample();
        assert!(insert(&canvas, &smallvec![0, 9], leaf("nope")).is_err());
        assert!(append(&canvas, &smallvec![0, 0, 0, 0], leaf("nope")).is_err());
    }
}
