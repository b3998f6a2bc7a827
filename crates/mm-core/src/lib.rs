//! Mindmap core: logical forest model, copy-on-write path editing, label
//! measurement, and the layout solver that turns trees into canvas
//! coordinates.

pub mod config;
pub mod error;
pub mod geometry;
pub mod id;
pub mod layout;
pub mod measure;
pub mod model;
pub mod path;

pub use config::MapConfig;
pub use error::PathError;
pub use geometry::{Point, Rect, Size};
pub use id::NodeId;
pub use layout::{LayoutEngine, connector};
pub use measure::{Measure, MeasureCache, NodeStyle, TextMetrics};
pub use model::{Canvas, CanvasView, Direction, TreeNode, ViewNode};
pub use path::NodePath;
