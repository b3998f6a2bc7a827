//! Drag-to-reparent session controller.
//!
//! One controller instance tracks one pointer gesture at a time:
//!
//! - **press** arms the controller on a node without committing to a drag —
//!   a click must stay a click.
//! - **motion** past the travel threshold starts the session: the source
//!   subtree is pulled out of the forest, and every further move produces a
//!   throwaway preview view — the working forest with a placeholder copy of
//!   the source at the current candidate path, or with the source floating
//!   at the pointer when nothing is in reach.
//! - **release** turns the final candidate into one real edit (reparent, or
//!   promote to a new top-level tree), which the caller pushes through the
//!   history. Nothing of the preview survives the gesture.
//!
//! Because the source is removed from the working forest up front, a node
//! can never be offered as its own descendant's child — the resolver simply
//! never sees the dragged subtree.

use crate::hit;
use mm_core::path::{self, NodePath};
use mm_core::{Canvas, CanvasView, LayoutEngine, PathError, Point, TreeNode};
use std::rc::Rc;

enum Phase {
    Idle,
    /// Pressed on a node, travel threshold not yet crossed.
    Armed {
        canvas: Canvas,
        path: NodePath,
        start: Point,
    },
    Dragging(DragSession),
}

/// Live state of one started drag.
struct DragSession {
    /// The forest with the source removed.
    working: Canvas,
    /// The subtree being dragged.
    source: Rc<TreeNode>,
    /// Candidate insertion path from the last motion, if any.
    target: Option<NodePath>,
    /// `working` plus the placeholder; equals `working` while no target.
    preview: Canvas,
}

/// What a completed gesture amounts to.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// The pointer never traveled far enough; treat as a plain click.
    Click,
    /// The gesture produced a forest to commit.
    Dropped { canvas: Canvas },
}

/// Pointer-gesture state machine. See the module docs for the lifecycle.
#[derive(Default)]
pub struct DragController {
    phase: Phase,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// Arm on the node at `path`. Fails fast on a stale path.
    pub fn press(&mut self, canvas: &Canvas, path: NodePath, at: Point) -> Result<(), PathError> {
        path::get(canvas, &path)?;
        self.phase = Phase::Armed {
            canvas: canvas.clone(),
            path,
            start: at,
        };
        Ok(())
    }

    /// Feed a pointer move. Returns the preview view to display while a
    /// drag is in progress, `None` while idle or still armed.
    pub fn motion(
        &mut self,
        engine: &mut LayoutEngine,
        at: Point,
    ) -> Result<Option<CanvasView>, PathError> {
        match std::mem::take(&mut self.phase) {
            Phase::Idle => Ok(None),
            Phase::Armed {
                canvas,
                path,
                start,
            } => {
                if start.taxicab(at) <= engine.config().drag_threshold {
                    self.phase = Phase::Armed {
                        canvas,
                        path,
                        start,
                    };
                    return Ok(None);
                }

                let source = path::get(&canvas, &path)?.clone();
                let working = path::delete(&canvas, &path)?;
                log::debug!("drag start: node {} lifted from {path:?}", source.id);
                let mut session = DragSession {
                    preview: working.clone(),
                    working,
                    source,
                    target: None,
                };
                let view = session.update(engine, at)?;
                self.phase = Phase::Dragging(session);
                Ok(Some(view))
            }
            Phase::Dragging(mut session) => {
                let view = session.update(engine, at)?;
                self.phase = Phase::Dragging(session);
                Ok(Some(view))
            }
        }
    }

    /// End the gesture. `None` when nothing was pressed.
    pub fn release(&mut self, at: Point) -> Result<Option<DragOutcome>, PathError> {
        match std::mem::take(&mut self.phase) {
            Phase::Idle => Ok(None),
            Phase::Armed { .. } => Ok(Some(DragOutcome::Click)),
            Phase::Dragging(session) => {
                let canvas = match &session.target {
                    Some(target) => {
                        log::debug!("drop: node {} reparented at {target:?}", session.source.id);
                        let child = Rc::new((*session.source).clone().into_child());
                        path::insert(&session.working, target, child)?
                    }
                    None => {
                        log::debug!("drop: node {} promoted to root at {at:?}", session.source.id);
                        let root = Rc::new((*session.source).clone().into_root(at));
                        path::insert(&session.working, &NodePath::new(), root)?
                    }
                };
                Ok(Some(DragOutcome::Dropped { canvas }))
            }
        }
    }
}

impl DragSession {
    /// One preview tick: resolve the candidate against the working forest,
    /// rebuild the placeholder forest only when the candidate changed, and
    /// lay out whatever should be on screen.
    fn update(&mut self, engine: &mut LayoutEngine, at: Point) -> Result<CanvasView, PathError> {
        let working_view = engine.layout(&self.working);
        let candidate = hit::drop_target(&working_view, at, engine.config());

        if candidate != self.target {
            log::debug!(
                "drop target changed: {:?} -> {:?}",
                self.target,
                candidate
            );
            self.preview = match &candidate {
                Some(target) => {
                    let mut ghost = (*self.source).clone().into_child();
                    ghost.drop_preview = true;
                    path::insert(&self.working, target, Rc::new(ghost))?
                }
                None => self.working.clone(),
            };
            self.target = candidate;
        }

        let mut view = if self.target.is_some() {
            engine.layout(&self.preview)
        } else {
            working_view
        };
        view.drop_target = self.target.clone();
        if self.target.is_none() {
            view.drag_source = Some(engine.layout_node(&self.source, at));
        }
        Ok(view)
    }
}
