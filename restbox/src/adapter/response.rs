//! Framework-agnostic response type returned by the boundary adapter.

use serde::Serialize;
use serde_json::{Value, json};

use restbox_core::error::{RecordStoreError, RecordStoreResult};

/// An HTTP-style status code and a JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    /// Build a 200 response.
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// Build a 201 response.
    pub fn created(body: Value) -> Self {
        Self { status: 201, body }
    }

    /// Build a 200 response from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> RecordStoreResult<Self> {
        Ok(Self::ok(serde_json::to_value(value)?))
    }

    /// Build an error response: `{"error": "<message>"}` with the error's status code.
    pub fn from_error(err: RecordStoreError) -> Self {
        Self {
            status: err.status_code(),
            body: json!({ "error": err.to_string() }),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<RecordStoreError> for Response {
    fn from(err: RecordStoreError) -> Self {
        Self::from_error(err)
    }
}
