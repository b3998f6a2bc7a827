//! Mind-map layout solver.
//!
//! Maps the logical forest to a view forest with absolute coordinates. Each
//! top-level tree is solved independently around the anchor coordinate its
//! root carries. Within a tree:
//!
//! 1. The root's immediate children are partitioned by [`Direction`] and the
//!    two sides are solved separately with the same recursive procedure,
//!    mirrored horizontally for `Left` — the sides fan out from one anchor
//!    and must not affect each other's vertical stacking.
//! 2. A bottom-up pass computes every subtree's stacked height (own box vs.
//!    children plus inter-sibling spans). Collapsed nodes contribute only
//!    their own box; their hidden descendants are never measured.
//! 3. A top-down pass assigns coordinates: children stack vertically,
//!    centered on the parent's stacked band, offset horizontally by half of
//!    both box widths plus the configured span.
//!
//! The merged view emits a root's children in logical order, so a path
//! computed against the view resolves to the same node in the logical
//! forest it was derived from.

use crate::config::MapConfig;
use crate::geometry::{Point, Rect, Size};
use crate::measure::{Measure, MeasureCache, TextMetrics};
use crate::model::{Canvas, CanvasView, Direction, TreeNode, ViewNode};

/// The layout solver. Owns the measurement boundary and its memo cache;
/// everything else is recomputed from scratch on every call.
pub struct LayoutEngine {
    config: MapConfig,
    measurer: Box<dyn Measure>,
    cache: MeasureCache,
}

/// Bottom-up annotation: measured box plus stacked subtree height.
struct SizedNode<'a> {
    node: &'a TreeNode,
    size: Size,
    height: f32,
    children: Vec<SizedNode<'a>>,
}

impl LayoutEngine {
    pub fn new(config: MapConfig, measurer: Box<dyn Measure>) -> Self {
        Self {
            config,
            measurer,
            cache: MeasureCache::new(),
        }
    }

    /// An engine backed by the deterministic [`TextMetrics`] estimator.
    pub fn with_text_metrics(config: MapConfig) -> Self {
        Self::new(config, Box::new(TextMetrics::default()))
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Lay out the whole canvas.
    pub fn layout(&mut self, canvas: &Canvas) -> CanvasView {
        self.cache.begin_pass();
        let children = canvas
            .children
            .iter()
            .map(|root| self.layout_tree(root, root.coord.unwrap_or_default()))
            .collect();
        self.cache.end_pass();
        log::trace!(
            "layout pass: {} trees, {} cached sizes",
            canvas.children.len(),
            self.cache.len()
        );
        CanvasView {
            children,
            drag_source: None,
            drop_target: None,
        }
    }

    /// Lay out a single tree anchored at an arbitrary point, outside any
    /// canvas — how the floating drag source is rendered while no drop
    /// target exists.
    pub fn layout_node(&mut self, node: &TreeNode, at: Point) -> ViewNode {
        self.layout_tree(node, at)
    }

    fn layout_tree(&mut self, root: &TreeNode, anchor: Point) -> ViewNode {
        let size = self.cache.size_of(root, self.measurer.as_ref());
        let right = self.layout_side(root, size, anchor, Direction::Right);
        let left = self.layout_side(root, size, anchor, Direction::Left);

        // Reassemble the two fans in logical child order; coordinates were
        // fixed by the per-side passes and do not depend on emission order.
        let mut right = right.into_iter();
        let mut left = left.into_iter();
        let children: Vec<ViewNode> = root
            .children
            .iter()
            .filter_map(|child| match child.direction {
                Direction::Right => right.next(),
                Direction::Left => left.next(),
            })
            .collect();

        let mut bounds = Rect::around(anchor, size);
        for child in &children {
            bounds = bounds.union(child.bounds);
        }

        ViewNode {
            id: root.id,
            label: root.label.clone(),
            expanded: root.expanded,
            direction: root.direction,
            root: root.root,
            drop_preview: root.drop_preview,
            coord: anchor,
            size,
            bounds,
            children,
        }
    }

    /// Solve one direction's fan: the root's children of that direction,
    /// stacked vertically against the side's own subtree height.
    fn layout_side(
        &mut self,
        root: &TreeNode,
        root_size: Size,
        anchor: Point,
        direction: Direction,
    ) -> Vec<ViewNode> {
        let side: Vec<&TreeNode> = root
            .children
            .iter()
            .map(|c| &**c)
            .filter(|c| c.direction == direction)
            .collect();

        if !root.expanded {
            return side
                .iter()
                .map(|child| self.placeholder(child, anchor))
                .collect();
        }

        let sized: Vec<SizedNode<'_>> = side
            .iter()
            .map(|child| self.sized(child, true))
            .collect();
        let side_height = stacked_height(root_size.height, &sized, self.config.vertical_span);

        let mut acc = 0.0;
        sized
            .iter()
            .map(|child| {
                let coord = self.child_coord(anchor, root_size, side_height, acc, child, direction);
                acc += child.height + self.config.vertical_span;
                self.place(child, coord, direction)
            })
            .collect()
    }

    /// Bottom-up pass. `visible == false` marks a collapsed ancestor's
    /// descendants: zero-size, never measured.
    fn sized<'a>(&mut self, node: &'a TreeNode, visible: bool) -> SizedNode<'a> {
        if !visible {
            return SizedNode {
                node,
                size: Size::ZERO,
                height: 0.0,
                children: node
                    .children
                    .iter()
                    .map(|c| self.sized(c, false))
                    .collect(),
            };
        }

        let children: Vec<SizedNode<'a>> = node
            .children
            .iter()
            .map(|c| self.sized(c, node.expanded))
            .collect();
        let size = self.cache.size_of(node, self.measurer.as_ref());
        let height = if node.expanded {
            stacked_height(size.height, &children, self.config.vertical_span)
        } else {
            size.height
        };

        SizedNode {
            node,
            size,
            height,
            children,
        }
    }

    /// Top-down pass: place a sized subtree whose own coordinate is known.
    fn place(&self, sized: &SizedNode<'_>, coord: Point, direction: Direction) -> ViewNode {
        let node = sized.node;
        let mut bounds = Rect::around(coord, sized.size);

        let children: Vec<ViewNode> = if node.expanded {
            let mut acc = 0.0;
            sized
                .children
                .iter()
                .map(|child| {
                    let child_coord =
                        self.child_coord(coord, sized.size, sized.height, acc, child, direction);
                    acc += child.height + self.config.vertical_span;
                    let view = self.place(child, child_coord, direction);
                    bounds = bounds.union(view.bounds);
                    view
                })
                .collect()
        } else {
            sized
                .children
                .iter()
                .map(|child| self.placeholder(child.node, coord))
                .collect()
        };

        ViewNode {
            id: node.id,
            label: node.label.clone(),
            expanded: node.expanded,
            direction: node.direction,
            root: node.root,
            drop_preview: node.drop_preview,
            coord,
            size: sized.size,
            bounds,
            children,
        }
    }

    fn child_coord(
        &self,
        parent: Point,
        parent_size: Size,
        parent_height: f32,
        acc: f32,
        child: &SizedNode<'_>,
        direction: Direction,
    ) -> Point {
        Point::new(
            parent.x
                + direction.sign()
                    * (parent_size.width / 2.0
                        + self.config.horizontal_span
                        + child.size.width / 2.0),
            parent.y + acc - parent_height / 2.0 + child.height / 2.0,
        )
    }

    /// A hidden descendant: zero box, pinned at its collapsed ancestor's
    /// coordinate so the node keeps a stable identity across toggles.
    fn placeholder(&self, node: &TreeNode, at: Point) -> ViewNode {
        ViewNode {
            id: node.id,
            label: node.label.clone(),
            expanded: node.expanded,
            direction: node.direction,
            root: node.root,
            drop_preview: node.drop_preview,
            coord: at,
            size: Size::ZERO,
            bounds: Rect::around(at, Size::ZERO),
            children: node
                .children
                .iter()
                .map(|c| self.placeholder(c, at))
                .collect(),
        }
    }
}

/// `max(own box height, Σ child subtree heights + (n−1) spans)`.
fn stacked_height(own: f32, children: &[SizedNode<'_>], span: f32) -> f32 {
    if children.is_empty() {
        return own;
    }
    let stacked =
        children.iter().map(|c| c.height).sum::<f32>() + span * (children.len() - 1) as f32;
    own.max(stacked)
}

/// Control points of the parent→child connector curve: a cubic from box
/// center to box center, bending through the two axis-aligned corners.
pub fn connector(parent: Point, child: Point) -> [Point; 4] {
    [
        parent,
        Point::new(child.x, parent.y),
        Point::new(parent.x, child.y),
        child,
    ]
}
