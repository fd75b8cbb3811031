//! # graphwalk_core
//!
//! Traversal engine for graphwalk object graphs.
//!
//! This crate provides:
//! - A worklist-driven [`walk`] that presents every reachable value to a
//!   visitor, exactly once on acyclic graphs
//! - Identity-based cycle detection via [`CycleGuard`]
//! - An assignment resolver ([`assign`], [`try_assign`]) that writes
//!   replacement values back through the parent chain
//!
//! ## Example
//!
//! ```rust
//! use graphwalk_core::{Action, try_assign, walk_with_cycle_detection};
//! use graphwalk_value::{Record, Value};
//!
//! let root = Value::ptr(
//!     Record::new("Doc")
//!         .with_field("title", "hello")
//!         .with_field("tags", Value::map([("lang", "en")])),
//! );
//!
//! walk_with_cycle_detection(&root, |node| {
//!     if let Some(s) = node.value().as_str() {
//!         try_assign(node, Value::from(s.to_uppercase()));
//!     }
//!     Ok::<_, ()>(Action::Continue)
//! })
//! .unwrap();
//!
//! let Value::Ptr(Some(cell)) = &root else { unreachable!() };
//! let stored = cell.borrow();
//! let title = stored.as_record().and_then(|r| r.field("title"));
//! assert_eq!(title.and_then(Value::as_str), Some("HELLO"));
//! ```

mod assign;
mod cycle;
mod error;
pub mod expand;
mod node;
mod visitor;
pub mod walker;

pub use assign::{assign, try_assign};
pub use cycle::CycleGuard;
pub use error::{AssignError, ConfigError};
pub use expand::{Child, expand};
pub use node::{Index, Node, NodeArena, NodeId};
pub use visitor::{Action, VisitResult, Visitor};
pub use walker::{WalkConfig, Walker, walk, walk_with_cycle_detection};
