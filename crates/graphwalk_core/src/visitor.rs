//! Visitor trait and traversal actions.

use serde::{Deserialize, Serialize};

use crate::Node;

/// What the engine should do after a node has been visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Expand the node's children and keep walking.
    Continue,
    /// Do not expand this node's children; keep walking the rest.
    SkipChildren,
    /// Terminate the whole walk successfully.
    Stop,
}

/// Result type returned by visitors.
pub type VisitResult<E> = Result<Action, E>;

/// A callback invoked once per dequeued node.
///
/// Any `FnMut(Node<'_>) -> Result<Action, E>` closure is a visitor. An error
/// aborts the walk and is returned to the caller unchanged.
pub trait Visitor {
    /// Application-level error type.
    type Error;

    /// Visits a node and decides how the walk continues.
    fn visit(&mut self, node: Node<'_>) -> VisitResult<Self::Error>;
}

impl<F, E> Visitor for F
where
    F: FnMut(Node<'_>) -> Result<Action, E>,
{
    type Error = E;

    #[inline]
    fn visit(&mut self, node: Node<'_>) -> VisitResult<E> {
        self(node)
    }
}
