//! Error types for assignment and configuration.

use graphwalk_value::{Kind, PlaceError};
use thiserror::Error;

/// Errors reported by [`assign`](crate::assign).
///
/// Both variants are local and recoverable: no mutation has been performed
/// when one of them is returned.
#[derive(Debug, Error)]
pub enum AssignError {
    /// No writable location exists anywhere along the node's parent chain.
    #[error("Cannot assign to {kind} value: no settable location along the parent chain")]
    NotSettable {
        /// Kind of the node the assignment was requested for.
        kind: Kind,
    },

    /// The located storage could not be written.
    #[error("Storage error: {0}")]
    Storage(#[from] PlaceError),
}

impl AssignError {
    /// Creates a not-settable error.
    pub fn not_settable(kind: Kind) -> Self {
        Self::NotSettable { kind }
    }
}

/// Errors that can occur while loading a [`WalkConfig`](crate::WalkConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document is malformed.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates an invalid configuration error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
