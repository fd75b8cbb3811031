//! Storage access error types.

use thiserror::Error;

use crate::{Kind, Step};

/// Errors that can occur when reading or writing a [`Place`](crate::Place).
#[derive(Debug, Error)]
pub enum PlaceError {
    /// The backing storage is already borrowed elsewhere.
    #[error("Storage is already borrowed")]
    Borrowed,

    /// A path step no longer matches the shape of the stored value.
    #[error("Cannot apply {step:?} to a {kind} value")]
    Unresolved {
        /// The step that failed.
        step: Step,
        /// Kind of the value the step was applied to.
        kind: Kind,
    },

    /// A position lies outside the stored sequence or record.
    #[error("Position {position} is out of bounds for length {len}")]
    OutOfBounds {
        /// The requested position.
        position: usize,
        /// The current length.
        len: usize,
    },
}
