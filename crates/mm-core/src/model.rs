//! Core mind-map data model.
//!
//! A canvas holds a forest of labelled trees. Each top-level node ("root")
//! carries an absolute coordinate; every descendant is positioned purely
//! relative to its ancestor chain by the layout solver. The logical forest
//! is the single source of truth: edits never mutate it in place, they
//! produce a new forest sharing untouched subtrees by `Rc` reference, which
//! is what makes whole-forest undo snapshots cheap.
//!
//! View types (`ViewNode`, `CanvasView`) are derived state — recomputed from
//! the logical forest on every layout pass, never written back.

use crate::geometry::{Point, Rect, Size};
use crate::id::NodeId;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

// ─── Logical tree ────────────────────────────────────────────────────────

/// Which side of its root a branch fans out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Horizontal sign for layout math: left mirrors the fan.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// One node of the logical forest.
///
/// `root` is true only for top-level nodes, which also carry `coord`; the
/// pair is normalized by [`TreeNode::into_root`] / [`TreeNode::into_child`]
/// when a drag moves a node across the top level. `direction` is fixed at
/// creation and inherited by children created under the node; it only
/// affects partitioning for nodes sitting directly under a root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: NodeId,
    pub label: String,
    pub children: Vec<Rc<TreeNode>>,
    pub expanded: bool,
    pub direction: Direction,
    #[serde(default)]
    pub root: bool,
    /// Absolute anchor; present only when `root`.
    #[serde(default)]
    pub coord: Option<Point>,
    /// Wrap the label at this width instead of auto-sizing.
    #[serde(default)]
    pub fixed_width: Option<f32>,
    /// Transient marker for the placeholder injected while a drag is
    /// pending; never true in a committed forest.
    #[serde(default, skip_serializing)]
    pub drop_preview: bool,
}

impl TreeNode {
    /// A fresh, empty, expanded node.
    pub fn new(label: impl Into<String>, direction: Direction) -> Self {
        Self {
            id: NodeId::fresh(),
            label: label.into(),
            children: Vec::new(),
            expanded: true,
            direction,
            root: false,
            coord: None,
            fixed_width: None,
            drop_preview: false,
        }
    }

    /// A fresh top-level node anchored at `at`.
    pub fn new_root(label: impl Into<String>, at: Point) -> Self {
        let mut node = Self::new(label, Direction::Right);
        node.root = true;
        node.coord = Some(at);
        node
    }

    /// Reshape this node (and only this node — the subtree is shared) into
    /// a top-level root anchored at `at`.
    pub fn into_root(mut self, at: Point) -> Self {
        self.root = true;
        self.coord = Some(at);
        self.drop_preview = false;
        self
    }

    /// Reshape this node into child form: no anchor, no root flag.
    pub fn into_child(mut self) -> Self {
        self.root = false;
        self.coord = None;
        self.drop_preview = false;
        self
    }

    /// Number of nodes in this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(|c| c.subtree_len()).sum::<usize>()
    }
}

/// The whole canvas: an ordered forest of independent trees.
///
/// Order is paint order and path-index order; it carries no other meaning.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Canvas {
    pub children: Vec<Rc<TreeNode>>,
}

impl Canvas {
    pub fn new(children: Vec<Rc<TreeNode>>) -> Self {
        Self { children }
    }

    /// Total node count across all trees.
    pub fn len(&self) -> usize {
        self.children.iter().map(|c| c.subtree_len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

// ─── Derived view ────────────────────────────────────────────────────────

/// A laid-out node: logical fields plus the solver's outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewNode {
    pub id: NodeId,
    pub label: String,
    pub children: Vec<ViewNode>,
    pub expanded: bool,
    pub direction: Direction,
    pub root: bool,
    /// Marks the pending-drop placeholder; such nodes are skipped by the
    /// drop resolver.
    pub drop_preview: bool,
    /// Absolute center of the node box.
    pub coord: Point,
    /// Measured box dimensions (zero for hidden placeholders).
    pub size: Size,
    /// Bounding box of the whole subtree, spacing included.
    pub bounds: Rect,
}

impl ViewNode {
    /// Pre-order walk over this subtree.
    pub fn walk(&self, f: &mut impl FnMut(&ViewNode)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }
}

/// The laid-out canvas handed to the rendering layer.
///
/// `drag_source` is present only mid-drag while no valid target exists (the
/// dragged tree floats unattached at the pointer); `drop_target` marks where
/// the dragged tree would land if released now.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanvasView {
    pub children: Vec<ViewNode>,
    pub drag_source: Option<ViewNode>,
    pub drop_target: Option<crate::path::NodePath>,
}
