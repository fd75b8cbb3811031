//! Nodes and the per-walk node arena.
//!
//! A [`Node`] is a handle into a [`NodeArena`]: the located value, the
//! parent it was reached from and the index used to reach it. Parents are
//! arena ids, never owning references into the object graph.

use std::sync::atomic::{AtomicU32, Ordering};

use graphwalk_value::{Key, Kind, Place, PlaceError, Value};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::expand::Child;

/// Position or key used to reach a node from its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Index {
    /// Zero-based position in a sequence or record.
    Position(usize),
    /// Key of a map entry.
    Key(Key),
}

impl std::fmt::Display for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Index::Position(position) => write!(f, "[{}]", position),
            Index::Key(key) => write!(f, "[{}]", key),
        }
    }
}

/// Identifier of a node within its arena.
///
/// Ids are branded with the arena that issued them, so an id from another
/// arena is rejected instead of resolving to an unrelated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    arena: u32,
    index: usize,
}

static NEXT_ARENA: AtomicU32 = AtomicU32::new(0);

struct Slot {
    value: Value,
    place: Option<Place>,
    parent: Option<NodeId>,
    index: Option<Index>,
    depth: usize,
}

/// Arena holding every node created during one walk.
///
/// Nodes are appended and never removed, so parent ids stay valid until the
/// arena is dropped. Snapshots share value-shaped contents with the graph
/// and with each other, so a node costs the same regardless of how deep
/// the value it holds is.
pub struct NodeArena {
    id: u32,
    slots: Vec<Slot>,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl NodeArena {
    /// Creates an empty arena.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_ARENA.fetch_add(1, Ordering::Relaxed),
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Adds a root node with no parent and no index.
    ///
    /// Pass a `place` when the root itself lives in writable storage.
    pub fn push_root(&mut self, value: Value, place: Option<Place>) -> NodeId {
        self.push(Slot {
            value,
            place,
            parent: None,
            index: None,
            depth: 0,
        })
    }

    /// Adds a child of `parent`.
    ///
    /// Returns `None` if `parent` was not issued by this arena.
    pub fn push_child(&mut self, parent: NodeId, child: Child) -> Option<NodeId> {
        self.contains(parent)
            .then(|| self.push_expanded(parent, child))
    }

    /// Adds a child of a node known to belong to this arena.
    pub(crate) fn push_expanded(&mut self, parent: NodeId, child: Child) -> NodeId {
        let depth = self.slots[parent.index].depth + 1;
        self.push(Slot {
            value: child.value,
            place: child.place,
            parent: Some(parent),
            index: child.index,
            depth,
        })
    }

    fn push(&mut self, slot: Slot) -> NodeId {
        let id = NodeId {
            arena: self.id,
            index: self.slots.len(),
        };
        self.slots.push(slot);
        id
    }

    #[inline]
    fn contains(&self, id: NodeId) -> bool {
        id.arena == self.id && id.index < self.slots.len()
    }

    /// Returns the node for `id`, if it belongs to this arena.
    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        self.contains(id).then_some(Node { arena: self, id })
    }

    pub(crate) fn node(&self, id: NodeId) -> Node<'_> {
        Node { arena: self, id }
    }

    /// Re-reads an addressable node's value from its storage.
    ///
    /// Keeps the previous snapshot when the place no longer resolves or its
    /// storage is mutably borrowed elsewhere.
    pub(crate) fn refresh(&mut self, id: NodeId) {
        let slot = &mut self.slots[id.index];
        let Some(place) = &slot.place else {
            return;
        };
        match place.read() {
            Ok(current) => slot.value = current,
            Err(PlaceError::Borrowed) => {
                warn!(depth = slot.depth, ?place, "storage is borrowed, keeping previous snapshot")
            }
            Err(err) => trace!(%err, ?place, "place no longer resolves, keeping previous snapshot"),
        }
    }

    /// Returns the number of nodes created so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no node has been created.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// A located value together with its parent link and index.
#[derive(Clone, Copy)]
pub struct Node<'w> {
    arena: &'w NodeArena,
    id: NodeId,
}

impl<'w> Node<'w> {
    #[inline]
    fn slot(&self) -> &'w Slot {
        &self.arena.slots[self.id.index]
    }

    /// Returns this node's arena id.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the located value.
    #[inline]
    pub fn value(&self) -> &'w Value {
        &self.slot().value
    }

    /// Returns the kind of the located value.
    #[inline]
    pub fn kind(&self) -> Kind {
        self.value().kind()
    }

    /// Returns the node this one was reached from.
    #[inline]
    pub fn parent(&self) -> Option<Node<'w>> {
        self.slot().parent.map(|id| self.arena.node(id))
    }

    /// Returns the position or key used to reach this node from its parent.
    ///
    /// Absent for the root, for map keys and for indirection targets.
    #[inline]
    pub fn index(&self) -> Option<&'w Index> {
        self.slot().index.as_ref()
    }

    /// Returns the number of edges between this node and the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.slot().depth
    }

    /// Returns the storage location of this node, if it is addressable.
    #[inline]
    pub fn place(&self) -> Option<&'w Place> {
        self.slot().place.as_ref()
    }

    /// Returns true if the value can be written in place.
    pub fn is_settable(&self) -> bool {
        self.place().is_some_and(Place::is_reachable)
    }

    /// Iterates over the parent chain, nearest parent first.
    pub fn ancestors(&self) -> impl Iterator<Item = Node<'w>> + use<'w> {
        std::iter::successors(self.parent(), |node| node.parent())
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("value", self.value())
            .field("parent", &self.slot().parent)
            .field("index", &self.index())
            .field("depth", &self.depth())
            .finish()
    }
}
