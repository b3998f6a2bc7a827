//! Mindmap editing engine: structural edits, whole-forest undo/redo, and
//! the drag-to-reparent pipeline (drop resolution + preview + commit) over
//! the mm-core model.

pub mod drag;
pub mod edit;
pub mod history;
pub mod hit;
pub mod session;

pub use drag::{DragController, DragOutcome};
pub use edit::{EditOp, apply_edit};
pub use history::History;
pub use hit::drop_target;
pub use session::Session;
