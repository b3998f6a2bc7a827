//! Layout and interaction tuning constants.

use serde::{Deserialize, Serialize};

/// Spacing and interaction constants for one map.
///
/// All distances are canvas pixels. The drop band (`drop_min_dx` /
/// `drop_max_dx`) bounds how far to the right of a candidate parent the
/// pointer must sit for a drop to attach there; the ceiling is a tuning
/// value, not an invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Vertical gap between sibling subtrees.
    pub vertical_span: f32,
    /// Horizontal gap between a parent box and its child boxes.
    pub horizontal_span: f32,
    /// Minimum `pointer.x - candidate.x` for a drop to attach (exclusive).
    pub drop_min_dx: f32,
    /// Maximum `pointer.x - candidate.x` for a drop to attach (exclusive).
    pub drop_max_dx: f32,
    /// Pointer travel (taxicab) before a press becomes a drag.
    pub drag_threshold: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            vertical_span: 20.0,
            horizontal_span: 20.0,
            drop_min_dx: 20.0,
            drop_max_dx: 100.0,
            drag_threshold: 5.0,
        }
    }
}
