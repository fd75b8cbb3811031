//! Kind and shape classification for [`Value`](crate::Value).
//!
//! `Kind` names the concrete variant of a value, `Shape` groups kinds by the
//! way the traversal engine expands them.

use serde::{Deserialize, Serialize};

/// Concrete kind of a [`Value`](crate::Value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub enum Kind {
    // Scalars
    /// The unit value.
    Unit,
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Owned string.
    Str,

    // Value-shaped composites
    /// Fixed sequence stored inline (by value).
    Array,
    /// Aggregate with ordered, named fields.
    Record,

    // Reference-bearing kinds
    /// Shared, growable sequence (by reference).
    List,
    /// Shared key/value mapping.
    Map,
    /// Nullable pointer to a shared cell.
    Ptr,
    /// Dynamically-typed wrapper holding a copy of another value.
    Dynamic,
    /// Function value.
    Func,
    /// Shared message queue.
    Chan,
    /// Raw handle to foreign data.
    Opaque,
}

/// Traversal shape of a kind.
///
/// The expansion rule is a match over this closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    /// Terminal value with no children.
    Scalar,
    /// Positional container (arrays and lists).
    Sequence,
    /// Keyed container.
    Mapping,
    /// Pointer-like or dynamic wrapper with at most one child.
    Indirection,
    /// Record with positional fields.
    Aggregate,
    /// Terminal reference-bearing value (functions, channels, raw handles).
    Handle,
}

impl Kind {
    /// Returns the traversal shape of this kind.
    #[inline]
    pub const fn shape(&self) -> Shape {
        match self {
            Kind::Unit | Kind::Bool | Kind::Int | Kind::Float | Kind::Str => Shape::Scalar,
            Kind::Array | Kind::List => Shape::Sequence,
            Kind::Map => Shape::Mapping,
            Kind::Ptr | Kind::Dynamic => Shape::Indirection,
            Kind::Record => Shape::Aggregate,
            Kind::Func | Kind::Chan | Kind::Opaque => Shape::Handle,
        }
    }

    /// Returns true if values of this kind have an identity distinct from
    /// their contents.
    ///
    /// `Dynamic`, `Array` and `Record` are value-shaped: two equal copies are
    /// indistinguishable, so they never carry an identity.
    #[inline]
    pub const fn is_reference(&self) -> bool {
        matches!(
            self,
            Kind::List | Kind::Map | Kind::Ptr | Kind::Func | Kind::Chan | Kind::Opaque
        )
    }

    /// Returns true if this kind is a scalar.
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(self.shape(), Shape::Scalar)
    }
}

impl Shape {
    /// Returns true for shapes the expansion rule never descends into.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Shape::Scalar | Shape::Handle)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kind::Unit => "Unit",
            Kind::Bool => "Bool",
            Kind::Int => "Int",
            Kind::Float => "Float",
            Kind::Str => "Str",
            Kind::Array => "Array",
            Kind::Record => "Record",
            Kind::List => "List",
            Kind::Map => "Map",
            Kind::Ptr => "Ptr",
            Kind::Dynamic => "Dynamic",
            Kind::Func => "Func",
            Kind::Chan => "Chan",
            Kind::Opaque => "Opaque",
        };
        write!(f, "{}", name)
    }
}
