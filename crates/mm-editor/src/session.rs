//! One editing session over one canvas.
//!
//! The session is the single object the rendering layer holds: it owns the
//! authoritative forest (through its history), the layout solver, and the
//! drag state, and keeps one derived [`CanvasView`] current. Every entry
//! point either commits a whole-forest edit through the history or updates
//! the view — the forest itself is never handed out mutably.

use crate::drag::{DragController, DragOutcome};
use crate::edit::{self, EditOp};
use crate::history::History;
use mm_core::path::{self, NodePath};
use mm_core::{Canvas, CanvasView, LayoutEngine, MapConfig, Measure, PathError, Point, TreeNode};
use std::rc::Rc;

pub struct Session {
    history: History,
    engine: LayoutEngine,
    drag: DragController,
    view: CanvasView,
}

impl Session {
    pub fn new(initial: Canvas, config: MapConfig, measurer: Box<dyn Measure>) -> Self {
        let mut engine = LayoutEngine::new(config, measurer);
        let view = engine.layout(&initial);
        Self {
            history: History::new(initial),
            engine,
            drag: DragController::new(),
            view,
        }
    }

    /// A session measuring with the built-in character metrics — enough for
    /// tests and headless use.
    pub fn with_text_metrics(initial: Canvas, config: MapConfig) -> Self {
        Self::new(
            initial,
            config,
            Box::new(mm_core::TextMetrics::default()),
        )
    }

    /// The committed forest.
    pub fn canvas(&self) -> &Canvas {
        self.history.current()
    }

    /// The current on-screen state: the committed forest's layout, or the
    /// live preview while a drag is in flight.
    pub fn view(&self) -> &CanvasView {
        &self.view
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    /// Apply one structural edit and commit it.
    pub fn apply(&mut self, op: EditOp) -> Result<(), PathError> {
        let next = edit::apply_edit(self.history.current(), op)?;
        self.commit(next);
        Ok(())
    }

    pub fn rename(&mut self, path: &NodePath, label: &str) -> Result<(), PathError> {
        let next = edit::rename(self.history.current(), path, label)?;
        self.commit(next);
        Ok(())
    }

    pub fn toggle_expanded(&mut self, path: &NodePath) -> Result<(), PathError> {
        let next = edit::toggle_expanded(self.history.current(), path)?;
        self.commit(next);
        Ok(())
    }

    pub fn set_fixed_width(
        &mut self,
        path: &NodePath,
        width: Option<f32>,
    ) -> Result<(), PathError> {
        let next = edit::set_fixed_width(self.history.current(), path, width)?;
        self.commit(next);
        Ok(())
    }

    /// Append a fresh node under `path`, inheriting the parent's branch
    /// direction. Returns the new node's path.
    pub fn add_child(&mut self, path: &NodePath, label: &str) -> Result<NodePath, PathError> {
        let parent = path::get(self.history.current(), path)?;
        let child = Rc::new(TreeNode::new(label, parent.direction));
        let index = parent.children.len();
        let next = path::append(self.history.current(), path, child)?;
        self.commit(next);
        let mut child_path = path.clone();
        child_path.push(index);
        Ok(child_path)
    }

    /// Add a fresh top-level tree anchored at `at`.
    pub fn add_root(&mut self, label: &str, at: Point) -> NodePath {
        let root = Rc::new(TreeNode::new_root(label, at));
        let mut children = self.history.current().children.clone();
        children.push(root);
        let index = children.len() - 1;
        self.commit(Canvas::new(children));
        let mut path = NodePath::new();
        path.push(index);
        path
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            self.refresh();
        }
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            self.refresh();
        }
        moved
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Pointer gestures ────────────────────────────────────────────────

    pub fn press(&mut self, path: NodePath, at: Point) -> Result<(), PathError> {
        self.drag.press(self.history.current(), path, at)
    }

    /// Feed a pointer move; while a drag is live this swaps the view for
    /// the gesture's preview.
    pub fn motion(&mut self, at: Point) -> Result<(), PathError> {
        if let Some(preview) = self.drag.motion(&mut self.engine, at)? {
            self.view = preview;
        }
        Ok(())
    }

    /// End the gesture; a completed drop commits through the history, and
    /// the view returns to the committed forest either way.
    pub fn release(&mut self, at: Point) -> Result<(), PathError> {
        match self.drag.release(at)? {
            Some(DragOutcome::Dropped { canvas }) => self.commit(canvas),
            Some(DragOutcome::Click) | None => self.refresh(),
        }
        Ok(())
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    fn commit(&mut self, next: Canvas) {
        self.history.commit(next);
        self.refresh();
    }

    fn refresh(&mut self) {
        self.view = self.engine.layout(self.history.current());
    }
}
