//! Error types and result types for collection operations.
//!
//! Every fallible operation in the engine returns [`RecordStoreResult<T>`]. The engine
//! performs no I/O, so every error is terminal and is surfaced to the caller as is.

use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when querying or mutating a collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordStoreError {
    /// A required field is missing or empty, or a query parameter is out of range.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    /// The referenced record does not exist.
    /// The first argument is the record ID, the second is the collection name.
    #[error("Record {0} not found in collection {1}")]
    NotFound(String, String),
    /// A field that must be unique across the collection is already taken.
    #[error("Conflict: {0}")]
    Conflict(String),
    /// The input payload cannot be parsed into the expected shape.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl RecordStoreError {
    /// Shorthand for a [`RecordStoreError::NotFound`] on the given collection.
    pub fn not_found(id: impl ToString, collection: &str) -> Self {
        RecordStoreError::NotFound(id.to_string(), collection.to_string())
    }

    /// Returns the HTTP-style status code a boundary should report for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RecordStoreError::ValidationFailed(_) => 400,
            RecordStoreError::BadRequest(_) => 400,
            RecordStoreError::NotFound(..) => 404,
            RecordStoreError::Conflict(_) => 409,
        }
    }
}

/// A specialized `Result` type for collection operations.
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;

impl From<SerdeJsonError> for RecordStoreError {
    fn from(err: SerdeJsonError) -> Self {
        RecordStoreError::BadRequest(err.to_string())
    }
}
