//! Record (aggregate) values.

use std::rc::Rc;

use crate::Value;

/// An aggregate value with ordered, named fields.
///
/// Fields are addressed by position during traversal and by name for
/// convenience. Records are value-shaped: a clone shares the field list
/// until either copy is modified, so cloning is cheap regardless of depth.
///
/// # Example
///
/// ```rust
/// use graphwalk_value::{Record, Value};
///
/// let record = Record::new("Point")
///     .with_field("x", 1)
///     .with_field("y", 2);
///
/// assert_eq!(record.len(), 2);
/// assert_eq!(record.field("y").and_then(Value::as_int), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    name: Option<Rc<str>>,
    fields: Rc<Vec<Field>>,
}

/// A single named record field.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Record {
    /// Creates an empty record with a type name.
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            name: Some(Rc::from(name)),
            fields: Rc::default(),
        }
    }

    /// Creates an empty record without a type name.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Appends a field, returning the record.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Appends a field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        Rc::make_mut(&mut self.fields).push(Field {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Returns the type name, if any.
    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns all fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the position of the first field with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Looks up a field value by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Looks up a field value by name for modification.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        Rc::make_mut(&mut self.fields)
            .iter_mut()
            .find(|f| f.name == name)
            .map(|f| &mut f.value)
    }

    /// Returns the value of the field at `position`.
    #[inline]
    pub fn value_at(&self, position: usize) -> Option<&Value> {
        self.fields.get(position).map(|f| &f.value)
    }

    /// Returns the value of the field at `position` for modification.
    #[inline]
    pub fn value_at_mut(&mut self, position: usize) -> Option<&mut Value> {
        Rc::make_mut(&mut self.fields)
            .get_mut(position)
            .map(|f| &mut f.value)
    }
}
