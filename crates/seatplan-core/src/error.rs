//! Error handling for Seatplan
//!
//! Provides the error types shared by every layer of the editor:
//! - Input errors (values rejected at the dialog/form boundary)
//! - Scene errors (lookups of entities that are not in the active scene)
//! - Edit session errors (modal editing state violations)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Collisions and out-of-bounds drags are deliberately *not* errors: the
//! interaction engine reverts the attempted move instead.

use thiserror::Error;

/// Input error type
///
/// Raised when a value coming from a form or dialog cannot be applied to the
/// scene. The mutation is never partially applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// A count (seats, panels, rows, columns) must be at least one
    #[error("{field} must be at least 1, got {value}")]
    NonPositiveCount {
        /// The name of the offending field.
        field: String,
        /// The rejected value.
        value: i64,
    },

    /// A count is larger than any floor plan can hold
    #[error("{field} must be at most {max}, got {value}")]
    CountTooLarge {
        /// The name of the offending field.
        field: String,
        /// The rejected value.
        value: i64,
        /// The largest accepted value.
        max: i64,
    },

    /// A dimension must be a finite, strictly positive number
    #[error("{field} must be a positive number, got {value}")]
    NonPositiveDimension {
        /// The name of the offending field.
        field: String,
        /// The rejected value.
        value: f64,
    },

    /// A seating id range is not usable
    #[error("Invalid seating range {start}..={end}: {reason}")]
    InvalidRange {
        /// First id of the range.
        start: i64,
        /// Last id of the range (inclusive).
        end: i64,
        /// The reason the range was rejected.
        reason: String,
    },

    /// A textual field could not be parsed as a number
    #[error("{field} is not a number: {raw:?}")]
    NotANumber {
        /// The name of the offending field.
        field: String,
        /// The raw text that failed to parse.
        raw: String,
    },

    /// The requested operation does not apply to this kind of entity
    #[error("{operation} is not supported for {kind}")]
    WrongKind {
        /// The attempted operation.
        operation: String,
        /// The entity kind it was attempted on.
        kind: String,
    },
}

/// Main error type for Seatplan
#[derive(Error, Debug)]
pub enum Error {
    /// Input rejected at the form boundary
    #[error(transparent)]
    InvalidInput(#[from] InputError),

    /// No entity with this id exists in the scene
    #[error("Unknown entity {id}")]
    UnknownEntity {
        /// The id that was looked up.
        id: u64,
    },

    /// An edit session is already open
    #[error("Entity {id} is already being edited")]
    EditInProgress {
        /// The id of the entity currently being edited.
        id: u64,
    },

    /// No edit session is open
    #[error("No edit session is open")]
    NoEditSession,
}

impl Error {
    /// Check if this is an input validation error
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
