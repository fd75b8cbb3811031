//! The dynamic value type.

use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use crate::{Key, Kind, Record, Shape};

/// Shared, interior-mutable storage.
///
/// Every reference-bearing kind stores its contents behind a `Shared`, so
/// cloning the value aliases the same storage.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a value in fresh shared storage.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// A node of an in-memory object graph.
///
/// Scalars, `Array`, `Record` and `Dynamic` are value-shaped: clones are
/// independent, but share their contents until one of them is written
/// (copy-on-write through [`Rc::make_mut`]). `List`, `Map`, `Ptr`, `Func`,
/// `Chan` and `Opaque` are reference-bearing: cloning copies the handle, and
/// the graph may contain cycles through them.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Rc<Vec<Value>>),
    Record(Record),
    List(Shared<Vec<Value>>),
    Map(Shared<BTreeMap<Key, Value>>),
    Ptr(Option<Shared<Value>>),
    Dynamic(Option<Rc<Value>>),
    Func(Func),
    Chan(Shared<VecDeque<Value>>),
    Opaque(Rc<dyn Any>),
}

/// A callable function value.
#[derive(Clone)]
pub struct Func(Rc<dyn Fn(&[Value]) -> Value>);

impl Func {
    /// Wraps a closure.
    pub fn new(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invokes the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    /// Returns the identity of the underlying closure.
    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Func({})", self.identity())
    }
}

/// Address-based identity of a reference-bearing value.
///
/// Two values share an identity exactly when they alias the same storage.
/// Identities are only meaningful while that storage is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity(usize);

impl Identity {
    /// Returns the identity of a reference-counted allocation.
    #[inline]
    pub fn of<T: ?Sized>(rc: &Rc<T>) -> Self {
        Self(Rc::as_ptr(rc).cast::<()>() as usize)
    }

    /// Returns the raw address.
    #[inline]
    pub const fn addr(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{:#x}", self.0)
    }
}

impl Value {
    /// Creates a shared list.
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(shared(items.into_iter().map(Into::into).collect()))
    }

    /// Creates an inline array.
    pub fn array<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Array(Rc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Creates a shared map.
    pub fn map<K: Into<Key>, T: Into<Value>>(entries: impl IntoIterator<Item = (K, T)>) -> Self {
        Value::Map(shared(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Creates a pointer to a freshly allocated cell.
    pub fn ptr(target: impl Into<Value>) -> Self {
        Value::Ptr(Some(shared(target.into())))
    }

    /// Creates a pointer to an existing cell.
    pub fn ptr_to(cell: &Shared<Value>) -> Self {
        Value::Ptr(Some(Rc::clone(cell)))
    }

    /// Creates a null pointer.
    pub const fn null_ptr() -> Self {
        Value::Ptr(None)
    }

    /// Wraps a value in a dynamic wrapper.
    pub fn dynamic(inner: impl Into<Value>) -> Self {
        Value::Dynamic(Some(Rc::new(inner.into())))
    }

    /// Creates a function value.
    pub fn func(f: impl Fn(&[Value]) -> Value + 'static) -> Self {
        Value::Func(Func::new(f))
    }

    /// Creates an empty channel.
    pub fn chan() -> Self {
        Value::Chan(shared(VecDeque::new()))
    }

    /// Creates an opaque handle around arbitrary data.
    pub fn opaque<T: Any>(data: T) -> Self {
        Value::Opaque(Rc::new(data))
    }

    /// Returns the kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Unit => Kind::Unit,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::Array(_) => Kind::Array,
            Value::Record(_) => Kind::Record,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Ptr(_) => Kind::Ptr,
            Value::Dynamic(_) => Kind::Dynamic,
            Value::Func(_) => Kind::Func,
            Value::Chan(_) => Kind::Chan,
            Value::Opaque(_) => Kind::Opaque,
        }
    }

    /// Returns the traversal shape of this value.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.kind().shape()
    }

    /// Returns the identity of a reference-bearing value.
    ///
    /// Only kinds for which [`Kind::is_reference`] holds carry an identity;
    /// null pointers have none.
    pub fn identity(&self) -> Option<Identity> {
        if !self.kind().is_reference() {
            return None;
        }
        match self {
            Value::List(items) => Some(Identity::of(items)),
            Value::Map(entries) => Some(Identity::of(entries)),
            Value::Ptr(Some(cell)) => Some(Identity::of(cell)),
            Value::Func(func) => Some(func.identity()),
            Value::Chan(queue) => Some(Identity::of(queue)),
            Value::Opaque(data) => Some(Identity::of(data)),
            _ => None,
        }
    }

    /// Returns true for null pointers and empty dynamic wrappers.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Ptr(None) | Value::Dynamic(None))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }
}

// Shared kinds print their identity only, so cyclic graphs can be debugged.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => f.write_str("Unit"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Record(record) => fmt::Debug::fmt(record, f),
            Value::Dynamic(inner) => f.debug_tuple("Dynamic").field(inner).finish(),
            Value::Ptr(None) => f.write_str("Ptr(null)"),
            Value::Func(func) => fmt::Debug::fmt(func, f),
            Value::List(_)
            | Value::Map(_)
            | Value::Ptr(Some(_))
            | Value::Chan(_)
            | Value::Opaque(_) => {
                let identity = self.identity().map(|id| id.addr()).unwrap_or_default();
                write!(f, "{}({:#x})", self.kind(), identity)
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}
