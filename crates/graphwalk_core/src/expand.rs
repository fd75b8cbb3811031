//! Expansion rule: the children a value exposes.
//!
//! | Shape | Children | Index |
//! |---|---|---|
//! | Mapping | key, then value, per entry in key order | none for keys, `Key` for values |
//! | Sequence | every element in order | `Position` |
//! | Indirection | the target, if non-null | none |
//! | Aggregate | every field in declaration order | `Position` |
//! | Scalar / Handle | nothing | - |
//!
//! Child snapshots are cheap: value-shaped contents are shared with the
//! parent until written, and reference-bearing contents are handles.

use graphwalk_value::{Place, PlaceError, Step, Value};

use crate::Index;

/// A child produced by [`expand`].
#[derive(Debug, Clone)]
pub struct Child {
    /// Snapshot of the child value.
    pub value: Value,
    /// Storage location, when the child is addressable.
    pub place: Option<Place>,
    /// Position or key within the parent.
    pub index: Option<Index>,
}

/// Lists the children of `value`.
///
/// `place` is the storage location of `value` itself; children of
/// addressable records and arrays inherit it extended by one step.
///
/// # Errors
///
/// Returns [`PlaceError::Borrowed`] when the shared storage of a list, map
/// or pointer is mutably borrowed elsewhere, the same way [`Place`] reports
/// it. No children are produced in that case.
pub fn expand(value: &Value, place: Option<&Place>) -> Result<Vec<Child>, PlaceError> {
    if value.shape().is_terminal() {
        return Ok(Vec::new());
    }

    let children = match value {
        Value::Map(entries) => {
            let entries = entries.try_borrow().map_err(|_| PlaceError::Borrowed)?;
            let mut children = Vec::with_capacity(entries.len() * 2);
            for (key, value) in entries.iter() {
                children.push(Child {
                    value: Value::from(key.clone()),
                    place: None,
                    index: None,
                });
                children.push(Child {
                    value: value.clone(),
                    place: None,
                    index: Some(Index::Key(key.clone())),
                });
            }
            children
        }
        Value::List(items) => items
            .try_borrow()
            .map_err(|_| PlaceError::Borrowed)?
            .iter()
            .enumerate()
            .map(|(position, item)| Child {
                value: item.clone(),
                place: Some(Place::slot(items, position)),
                index: Some(Index::Position(position)),
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(position, item)| Child {
                value: item.clone(),
                place: place.map(|p| p.join(Step::Element(position))),
                index: Some(Index::Position(position)),
            })
            .collect(),
        Value::Ptr(Some(cell)) => vec![Child {
            value: cell.try_borrow().map_err(|_| PlaceError::Borrowed)?.clone(),
            place: Some(Place::cell(cell)),
            index: None,
        }],
        Value::Dynamic(Some(inner)) => vec![Child {
            value: Value::clone(inner),
            place: None,
            index: None,
        }],
        Value::Record(record) => record
            .fields()
            .iter()
            .enumerate()
            .map(|(position, field)| Child {
                value: field.value.clone(),
                place: place.map(|p| p.join(Step::Field(position))),
                index: Some(Index::Position(position)),
            })
            .collect(),
        // null indirections
        _ => Vec::new(),
    };
    Ok(children)
}
