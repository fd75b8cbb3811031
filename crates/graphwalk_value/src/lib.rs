//! # graphwalk_value
//!
//! The in-memory object model walked by graphwalk.
//!
//! This crate provides a closed, dynamically-typed [`Value`] enum standing in
//! for runtime type inspection: every value classifies into a [`Kind`] and a
//! traversal [`Shape`], reference-bearing values expose an address-based
//! [`Identity`], and addressable locations are described by a [`Place`].
//!
//! ## Architecture
//!
//! - Scalars, arrays, records and dynamic wrappers are value-shaped and are
//!   copied on clone
//! - Lists, maps, pointers, functions, channels and opaque handles live behind
//!   `Rc<RefCell<_>>` and may form cycles
//! - Map values and dynamic contents are never addressable; writing them back
//!   goes through the owning container
//!
//! ## Example
//!
//! ```rust
//! use graphwalk_value::{Kind, Record, Shape, Value};
//!
//! let root = Value::ptr(
//!     Record::new("Doc")
//!         .with_field("title", "hello")
//!         .with_field("tags", Value::list(["a", "b"])),
//! );
//!
//! assert_eq!(root.kind(), Kind::Ptr);
//! assert_eq!(root.shape(), Shape::Indirection);
//! assert!(root.identity().is_some());
//! ```

mod error;
#[cfg(feature = "json")]
mod json;
mod key;
mod kind;
mod place;
mod record;
mod value;

pub use error::PlaceError;
pub use key::Key;
pub use kind::{Kind, Shape};
pub use place::{Place, Step};
pub use record::{Field, Record};
pub use value::{Func, Identity, Shared, Value, shared};
