//! Error types for forest addressing.

use crate::path::NodePath;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A supplied path does not resolve in the given forest. Usually means
    /// the path was computed against a stale snapshot; callers should abort
    /// the edit and keep their prior state.
    #[error("no node at path {path:?}")]
    NotFound { path: NodePath },
}

impl PathError {
    pub(crate) fn not_found(path: &NodePath) -> Self {
        Self::NotFound { path: path.clone() }
    }
}
