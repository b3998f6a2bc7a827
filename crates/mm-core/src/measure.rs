//! Label measurement and its memo cache.
//!
//! Measuring a label is assumed to be the most expensive primitive in a
//! layout pass — a real frontend answers it with an off-screen text layout.
//! The solver therefore consults a [`MeasureCache`] keyed by node id: a node
//! is re-measured only when the content that affects its box (label text,
//! fixed-width flag) actually changed. Collapsed subtrees are never measured
//! at all, which bounds measurement work to the visible node set.

use crate::geometry::Size;
use crate::id::NodeId;
use crate::model::TreeNode;
use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

/// The style inputs that affect a node's box size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeStyle {
    /// Wrap at this total box width instead of auto-sizing to the text.
    pub fixed_width: Option<f32>,
}

impl NodeStyle {
    pub fn of(node: &TreeNode) -> Self {
        Self {
            fixed_width: node.fixed_width,
        }
    }
}

/// Boundary to the text-measurement substrate.
///
/// Implementations must be pure: the same label and style always produce
/// the same size, or the memo cache will serve stale boxes.
pub trait Measure {
    fn measure(&self, label: &str, style: &NodeStyle) -> Size;
}

/// Deterministic character-metrics estimator.
///
/// Stands in for a real text system in tests and headless use: a flat
/// per-character advance plus box padding, with fixed-width labels wrapped
/// onto ⌈text width / content width⌉ lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub char_width: f32,
    pub line_height: f32,
    pub h_padding: f32,
    pub v_padding: f32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 20.0,
            h_padding: 10.0,
            v_padding: 5.0,
        }
    }
}

impl Measure for TextMetrics {
    fn measure(&self, label: &str, style: &NodeStyle) -> Size {
        let chars = label.chars().count().max(1) as f32;
        let text_width = chars * self.char_width;
        match style.fixed_width {
            Some(width) => {
                let content = (width - 2.0 * self.h_padding).max(self.char_width);
                let lines = (text_width / content).ceil().max(1.0);
                Size::new(width, lines * self.line_height + 2.0 * self.v_padding)
            }
            None => Size::new(
                text_width + 2.0 * self.h_padding,
                self.line_height + 2.0 * self.v_padding,
            ),
        }
    }
}

/// Memoized per-node sizes, valid across layout passes.
///
/// Entries carry a fingerprint of the size-relevant content, so the cache
/// self-invalidates on edits (edits produce new node values, but ids are
/// stable). A generation sweep after each pass drops entries the pass never
/// touched, keeping the cache bounded by the visible node count.
#[derive(Debug, Default)]
pub struct MeasureCache {
    entries: HashMap<NodeId, Entry>,
    generation: u64,
}

#[derive(Debug)]
struct Entry {
    fingerprint: u64,
    size: Size,
    generation: u64,
}

impl MeasureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The measured size of `node`, from cache when its content fingerprint
    /// is unchanged.
    pub fn size_of(&mut self, node: &TreeNode, measurer: &dyn Measure) -> Size {
        let fingerprint = content_fingerprint(&node.label, node.fixed_width);
        if let Some(entry) = self.entries.get_mut(&node.id)
            && entry.fingerprint == fingerprint
        {
            entry.generation = self.generation;
            return entry.size;
        }

        let size = measurer.measure(&node.label, &NodeStyle::of(node));
        self.entries.insert(
            node.id,
            Entry {
                fingerprint,
                size,
                generation: self.generation,
            },
        );
        size
    }

    /// Start a layout pass: entries touched from here on survive the sweep.
    pub fn begin_pass(&mut self) {
        self.generation += 1;
    }

    /// End a layout pass: drop entries no recent pass touched. One prior
    /// generation is kept alive so the floating drag source, which is laid
    /// out between passes, keeps its memoized size across ticks.
    pub fn end_pass(&mut self) {
        let generation = self.generation;
        self.entries
            .retain(|_, entry| entry.generation + 1 >= generation);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn content_fingerprint(label: &str, fixed_width: Option<f32>) -> u64 {
    let mut hasher = DefaultHasher::new();
    label.hash(&mut hasher);
    fixed_width.map(f32::to_bits).hash(&mut hasher);
    hasher.finish()
}
