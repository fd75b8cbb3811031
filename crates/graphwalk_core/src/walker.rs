//! Worklist-driven traversal engine.
//!
//! This module provides the walk over an object graph:
//! - An unordered worklist seeded with the root node
//! - Visitor-controlled pruning and early termination
//! - Optional cycle detection and depth limiting via [`WalkConfig`]
//!
//! ## Borrowed storage
//!
//! The engine reads shared storage with `try_borrow` and never panics on a
//! borrow conflict. If a visitor keeps part of the graph mutably borrowed
//! after returning, a node whose place is borrowed keeps its previous
//! snapshot, and a node whose own storage is borrowed is visited but not
//! expanded. Both cases are logged at `warn` level.

use graphwalk_value::{Place, Shared, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::ConfigError;
use crate::expand::expand;
use crate::{Action, CycleGuard, Node, NodeArena, NodeId, Visitor};

/// Configuration for a [`Walker`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct WalkConfig {
    /// Whether to wrap the visitor in a [`CycleGuard`].
    /// Default: false
    pub detect_cycles: bool,
    /// Nodes at this depth are visited but not expanded.
    /// Default: None (no limit)
    pub max_depth: Option<usize>,
    /// Initial capacity of the worklist and node arena.
    /// Default: 64
    pub capacity: usize,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            detect_cycles: false,
            max_depth: None,
            capacity: 64,
        }
    }
}

impl WalkConfig {
    /// Creates a new `WalkConfig` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::invalid(e.to_string()))
    }

    /// Enables or disables cycle detection.
    pub fn detect_cycles(mut self, yes: bool) -> Self {
        self.detect_cycles = yes;
        self
    }

    /// Sets the maximum expansion depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Sets the initial worklist capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Traversal engine.
///
/// Each call to [`walk`](Walker::walk) owns a fresh worklist, node arena
/// and, when enabled, identity set. The walker itself holds only
/// configuration and can be reused.
#[derive(Debug, Clone, Default)]
pub struct Walker {
    config: WalkConfig,
}

impl Walker {
    /// Creates a new `Walker` with the given configuration.
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Creates a new `Walker` with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(WalkConfig::default())
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    /// Walks every value reachable from `root` with a closure visitor.
    ///
    /// The root itself is not addressable; use [`walk_shared`](Self::walk_shared)
    /// when the root must be replaceable.
    pub fn walk<F, E>(&self, root: &Value, visitor: F) -> Result<(), E>
    where
        F: FnMut(Node<'_>) -> Result<Action, E>,
    {
        self.visit(root, visitor)
    }

    /// Walks every value reachable from the contents of `root`.
    ///
    /// The root node is addressable through the cell. Nothing is visited if
    /// the cell is mutably borrowed when the walk starts.
    pub fn walk_shared<F, E>(&self, root: &Shared<Value>, visitor: F) -> Result<(), E>
    where
        F: FnMut(Node<'_>) -> Result<Action, E>,
    {
        let place = Place::cell(root);
        let snapshot = match place.read() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "cannot read root cell, nothing to walk");
                return Ok(());
            }
        };
        let mut arena = NodeArena::with_capacity(self.config.capacity);
        let id = arena.push_root(snapshot, Some(place));
        self.run(arena, id, visitor)
    }

    /// Walks every value reachable from `root` with any [`Visitor`].
    pub fn visit<V: Visitor>(&self, root: &Value, visitor: V) -> Result<(), V::Error> {
        let mut arena = NodeArena::with_capacity(self.config.capacity);
        let id = arena.push_root(root.clone(), None);
        self.run(arena, id, visitor)
    }

    fn run<V: Visitor>(&self, arena: NodeArena, root: NodeId, visitor: V) -> Result<(), V::Error> {
        debug!(
            root = %arena.node(root).kind(),
            detect_cycles = self.config.detect_cycles,
            max_depth = ?self.config.max_depth,
            "starting walk"
        );
        if self.config.detect_cycles {
            self.drive(arena, root, CycleGuard::new(visitor))
        } else {
            self.drive(arena, root, visitor)
        }
    }

    fn drive<V: Visitor>(
        &self,
        mut arena: NodeArena,
        root: NodeId,
        mut visitor: V,
    ) -> Result<(), V::Error> {
        let mut worklist = Vec::with_capacity(self.config.capacity);
        worklist.push(root);
        let mut visits = 0usize;

        while !worklist.is_empty() {
            // Unordered pop: the last entry moves into the first slot.
            let id = worklist.swap_remove(0);
            arena.refresh(id);
            visits += 1;

            let node = arena.node(id);
            trace!(depth = node.depth(), kind = %node.kind(), index = ?node.index(), "visiting node");
            let action = match visitor.visit(node) {
                Ok(action) => action,
                Err(err) => {
                    debug!(visits, pending = worklist.len(), "walk aborted by visitor error");
                    return Err(err);
                }
            };

            match action {
                Action::Continue => {}
                Action::SkipChildren => continue,
                Action::Stop => {
                    debug!(visits, pending = worklist.len(), "walk stopped by visitor");
                    return Ok(());
                }
            }

            if let Some(max_depth) = self.config.max_depth
                && arena.node(id).depth() >= max_depth
            {
                continue;
            }

            // The visitor may have written through this node's own place.
            arena.refresh(id);
            let node = arena.node(id);
            let children = match expand(node.value(), node.place()) {
                Ok(children) => children,
                Err(err) => {
                    warn!(%err, depth = node.depth(), kind = %node.kind(), "cannot expand node");
                    continue;
                }
            };
            for child in children {
                worklist.push(arena.push_expanded(id, child));
            }
        }

        debug!(visits, nodes = arena.len(), "walk finished");
        Ok(())
    }
}

/// Walks `root` without cycle detection.
///
/// Terminates on acyclic graphs. On cyclic graphs the visitor must prune
/// repeats itself, or use [`walk_with_cycle_detection`].
pub fn walk<F, E>(root: &Value, visitor: F) -> Result<(), E>
where
    F: FnMut(Node<'_>) -> Result<Action, E>,
{
    Walker::with_defaults().walk(root, visitor)
}

/// Walks `root`, presenting each reference-bearing identity at most once.
pub fn walk_with_cycle_detection<F, E>(root: &Value, visitor: F) -> Result<(), E>
where
    F: FnMut(Node<'_>) -> Result<Action, E>,
{
    Walker::new(WalkConfig::new().detect_cycles(true)).walk(root, visitor)
}
