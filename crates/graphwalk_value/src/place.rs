//! Settable storage locations.
//!
//! A [`Place`] names a location inside the object graph that can be written
//! in place: the target of a pointer, an element of a shared list, or a
//! field/element reached from either of those through by-value records and
//! arrays. Map values and dynamic contents are copies and never have a place.

use std::rc::Rc;

use crate::{Kind, Shared, Value};
use crate::error::PlaceError;

/// One step from a by-value composite into one of its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Field at a position of a [`Value::Record`].
    Field(usize),
    /// Element at a position of a [`Value::Array`].
    Element(usize),
}

#[derive(Clone)]
enum Anchor {
    Cell(Shared<Value>),
    Slot(Shared<Vec<Value>>, usize),
}

// Persistent path, innermost step first. Joined places share their prefix.
struct Link {
    step: Step,
    outer: Option<Rc<Link>>,
}

/// A settable storage location.
///
/// Joining a step is constant time and shares the path prefix with the outer
/// place; reading or writing resolves the path from the anchor.
///
/// # Example
///
/// ```rust
/// use graphwalk_value::{Place, Record, Step, Value, shared};
///
/// let cell = shared(Value::from(Record::new("R").with_field("name", "old")));
/// let place = Place::cell(&cell).join(Step::Field(0));
///
/// let previous = place.replace(Value::from("new")).unwrap();
/// assert_eq!(previous.as_str(), Some("old"));
/// assert_eq!(place.read().unwrap().as_str(), Some("new"));
/// ```
#[derive(Clone)]
pub struct Place {
    anchor: Anchor,
    path: Option<Rc<Link>>,
    len: usize,
}

impl Place {
    /// The contents of a pointer cell.
    pub fn cell(cell: &Shared<Value>) -> Self {
        Self {
            anchor: Anchor::Cell(Rc::clone(cell)),
            path: None,
            len: 0,
        }
    }

    /// The element at `position` of a shared list.
    pub fn slot(list: &Shared<Vec<Value>>, position: usize) -> Self {
        Self {
            anchor: Anchor::Slot(Rc::clone(list), position),
            path: None,
            len: 0,
        }
    }

    /// Returns the place one step further inside this one.
    pub fn join(&self, step: Step) -> Self {
        Self {
            anchor: self.anchor.clone(),
            path: Some(Rc::new(Link {
                step,
                outer: self.path.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Returns the steps below the anchor, outermost first.
    pub fn path(&self) -> Vec<Step> {
        let mut steps = Vec::with_capacity(self.len);
        let mut link = self.path.as_deref();
        while let Some(current) = link {
            steps.push(current.step);
            link = current.outer.as_deref();
        }
        steps.reverse();
        steps
    }

    /// Reads a copy of the value currently stored at this place.
    pub fn read(&self) -> Result<Value, PlaceError> {
        match &self.anchor {
            Anchor::Cell(cell) => {
                let root = cell.try_borrow().map_err(|_| PlaceError::Borrowed)?;
                descend(&root, &self.path()).cloned()
            }
            Anchor::Slot(list, position) => {
                let items = list.try_borrow().map_err(|_| PlaceError::Borrowed)?;
                let root = slot(&items, *position)?;
                descend(root, &self.path()).cloned()
            }
        }
    }

    /// Returns true if the path still resolves against the current storage.
    pub fn is_reachable(&self) -> bool {
        match &self.anchor {
            Anchor::Cell(cell) => cell
                .try_borrow()
                .is_ok_and(|root| descend(&root, &self.path()).is_ok()),
            Anchor::Slot(list, position) => list.try_borrow().is_ok_and(|items| {
                slot(&items, *position).is_ok_and(|root| descend(root, &self.path()).is_ok())
            }),
        }
    }

    /// Stores `value` at this place and returns the previous value.
    pub fn replace(&self, value: Value) -> Result<Value, PlaceError> {
        match &self.anchor {
            Anchor::Cell(cell) => {
                let mut root = cell.try_borrow_mut().map_err(|_| PlaceError::Borrowed)?;
                let target = descend_mut(&mut root, &self.path())?;
                Ok(std::mem::replace(target, value))
            }
            Anchor::Slot(list, position) => {
                let mut items = list.try_borrow_mut().map_err(|_| PlaceError::Borrowed)?;
                let len = items.len();
                let root = items.get_mut(*position).ok_or(PlaceError::OutOfBounds {
                    position: *position,
                    len,
                })?;
                let target = descend_mut(root, &self.path())?;
                Ok(std::mem::replace(target, value))
            }
        }
    }
}

impl std::fmt::Debug for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.anchor {
            Anchor::Cell(cell) => write!(f, "Place(cell {:p}", Rc::as_ptr(cell))?,
            Anchor::Slot(list, position) => {
                write!(f, "Place(list {:p}[{}]", Rc::as_ptr(list), position)?
            }
        }
        for step in self.path() {
            match step {
                Step::Field(i) => write!(f, ".{}", i)?,
                Step::Element(i) => write!(f, "[{}]", i)?,
            }
        }
        f.write_str(")")
    }
}

fn slot(items: &[Value], position: usize) -> Result<&Value, PlaceError> {
    items.get(position).ok_or(PlaceError::OutOfBounds {
        position,
        len: items.len(),
    })
}

fn descend<'v>(mut value: &'v Value, path: &[Step]) -> Result<&'v Value, PlaceError> {
    for step in path {
        value = match (step, value) {
            (Step::Field(i), Value::Record(record)) => {
                record.value_at(*i).ok_or(PlaceError::OutOfBounds {
                    position: *i,
                    len: record.len(),
                })?
            }
            (Step::Element(i), Value::Array(items)) => slot(items, *i)?,
            (step, other) => return Err(unresolved(*step, other.kind())),
        };
    }
    Ok(value)
}

fn descend_mut<'v>(mut value: &'v mut Value, path: &[Step]) -> Result<&'v mut Value, PlaceError> {
    for step in path {
        value = match (step, value) {
            (Step::Field(i), Value::Record(record)) => {
                let len = record.len();
                record
                    .value_at_mut(*i)
                    .ok_or(PlaceError::OutOfBounds { position: *i, len })?
            }
            (Step::Element(i), Value::Array(items)) => {
                let len = items.len();
                Rc::make_mut(items)
                    .get_mut(*i)
                    .ok_or(PlaceError::OutOfBounds { position: *i, len })?
            }
            (step, other) => return Err(unresolved(*step, other.kind())),
        };
    }
    Ok(value)
}

fn unresolved(step: Step, kind: Kind) -> PlaceError {
    PlaceError::Unresolved { step, kind }
}
