//! Write-back of replacement values through the parent chain.
//!
//! Nodes hold snapshots. A node with a reachable [`Place`] is written
//! directly; otherwise the resolver climbs toward the root looking for the
//! container that owns the copy:
//!
//! - a list writes the element at the node's position
//! - an array writes through its own place
//! - a map inserts the replacement under the node's key
//! - a dynamic wrapper is climbed through, and the replacement is wrapped
//!   once per climbed level so the stored shape is preserved

use graphwalk_value::{Place, PlaceError, Step, Value};
use tracing::{debug, trace};

use crate::error::AssignError;
use crate::{Index, Node};

/// Attempts to store `value` at the location `node` was reached from.
///
/// Returns false, without mutating anything, when no writable location
/// exists along the parent chain.
pub fn try_assign(node: Node<'_>, value: Value) -> bool {
    match assign(node, value) {
        Ok(()) => true,
        Err(err) => {
            debug!(%err, kind = %node.kind(), depth = node.depth(), "assignment failed");
            false
        }
    }
}

/// Stores `value` at the location `node` was reached from.
///
/// # Errors
///
/// - [`AssignError::NotSettable`] when no writable location is found
/// - [`AssignError::Storage`] when the located storage is borrowed elsewhere
pub fn assign(node: Node<'_>, value: Value) -> Result<(), AssignError> {
    let mut candidate = node;
    let mut layers = 0usize;

    loop {
        if let Some(place) = candidate.place()
            && write(place, rewrap(&value, layers))?
        {
            return Ok(());
        }

        let Some(parent) = candidate.parent() else {
            break;
        };

        let written = match (parent.value(), candidate.index()) {
            (Value::List(items), Some(Index::Position(position))) => {
                write(&Place::slot(items, *position), rewrap(&value, layers))?
            }
            (Value::Array(_), Some(Index::Position(position))) => match parent.place() {
                Some(place) => write(&place.join(Step::Element(*position)), rewrap(&value, layers))?,
                None => false,
            },
            (Value::Map(entries), Some(Index::Key(key))) => {
                entries
                    .try_borrow_mut()
                    .map_err(|_| PlaceError::Borrowed)?
                    .insert(key.clone(), rewrap(&value, layers));
                true
            }
            (Value::Dynamic(_), _) => {
                trace!(depth = parent.depth(), "climbing through dynamic wrapper");
                candidate = parent;
                layers += 1;
                continue;
            }
            _ => false,
        };

        if written {
            return Ok(());
        }
        break;
    }

    Err(AssignError::not_settable(node.kind()))
}

/// Writes through `place`, reporting a stale path as `Ok(false)`.
fn write(place: &Place, value: Value) -> Result<bool, PlaceError> {
    match place.replace(value) {
        Ok(_) => Ok(true),
        Err(PlaceError::Borrowed) => Err(PlaceError::Borrowed),
        Err(err) => {
            trace!(%err, ?place, "place no longer resolves");
            Ok(false)
        }
    }
}

fn rewrap(value: &Value, layers: usize) -> Value {
    let mut value = value.clone();
    for _ in 0..layers {
        value = Value::dynamic(value);
    }
    value
}
