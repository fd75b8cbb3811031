//! Cycle detection for visitors.

use graphwalk_value::{Identity, Value};
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::{Action, Node, Visitor, VisitResult};

/// Wraps a visitor so each reference-bearing location is presented at most
/// once.
///
/// Before delegating, the guard checks the [`Identity`] of nodes whose kind
/// is reference-bearing ([`Kind::is_reference`](graphwalk_value::Kind::is_reference)).
/// A repeated identity yields [`Action::SkipChildren`] without calling the
/// inner visitor. Value-shaped nodes always delegate.
///
/// # Example
///
/// ```rust
/// use graphwalk_core::{Action, CycleGuard, Walker};
/// use graphwalk_value::{Value, shared};
///
/// // A pointer that points at itself.
/// let cell = shared(Value::Unit);
/// *cell.borrow_mut() = Value::ptr_to(&cell);
///
/// let mut visits = 0;
/// let guard = CycleGuard::new(|_node: graphwalk_core::Node<'_>| {
///     visits += 1;
///     Ok::<_, ()>(Action::Continue)
/// });
/// Walker::with_defaults().visit(&Value::ptr_to(&cell), guard).unwrap();
/// assert_eq!(visits, 1);
/// ```
pub struct CycleGuard<V> {
    inner: V,
    seen: FxHashSet<Identity>,
    // Holds the storage behind every recorded identity so its address
    // cannot be reused by a new allocation while the guard is alive.
    pinned: Vec<Value>,
}

impl<V> CycleGuard<V> {
    /// Wraps `inner` with an empty identity set.
    pub fn new(inner: V) -> Self {
        Self {
            inner,
            seen: FxHashSet::default(),
            pinned: Vec::new(),
        }
    }

    /// Returns the number of distinct identities recorded so far.
    #[inline]
    pub fn seen(&self) -> usize {
        self.seen.len()
    }

    /// Returns true if `identity` has already been presented.
    #[inline]
    pub fn has_seen(&self, identity: Identity) -> bool {
        self.seen.contains(&identity)
    }

    /// Unwraps the inner visitor, discarding the identity set.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: Visitor> Visitor for CycleGuard<V> {
    type Error = V::Error;

    fn visit(&mut self, node: Node<'_>) -> VisitResult<Self::Error> {
        let value = node.value();
        if value.kind().is_reference()
            && let Some(identity) = value.identity()
        {
            if !self.seen.insert(identity) {
                trace!(%identity, kind = %value.kind(), "skipping already visited reference");
                return Ok(Action::SkipChildren);
            }
            self.pinned.push(value.clone());
        }
        self.inner.visit(node)
    }
}
