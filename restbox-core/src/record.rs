//! Core traits that every resource kind stored in a collection must implement.
//!
//! A resource kind is described by three types: the record itself, a draft used by
//! create and full replace, and a patch used by partial merge. Identity fields appear
//! only on the record, so neither a draft nor a patch can carry a new `id` or creation
//! timestamp into the collection.

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

use crate::{
    error::{RecordStoreError, RecordStoreResult},
    value::FieldValue,
};

/// Store-assigned record identifier. Always positive.
pub type RecordId = u64;

/// A closed enumeration of the fields of one resource kind.
///
/// Every variant is sortable; [`RecordField::searchable`] names the subset that
/// free-text search looks at.
pub trait RecordField: Copy + Eq + Debug + Send + Sync + 'static {
    /// Returns every field of the resource kind.
    fn all() -> &'static [Self];

    /// Returns the fields that free-text search matches against.
    fn searchable() -> &'static [Self];

    /// Returns the external (wire) name of this field.
    fn name(&self) -> &'static str;

    /// Resolves an external field name.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::ValidationFailed`] if the name is not one of [`RecordField::all`].
    fn parse(name: &str) -> RecordStoreResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|field| field.name() == name)
            .ok_or_else(|| {
                let allowed = Self::all()
                    .iter()
                    .map(|field| field.name())
                    .collect::<Vec<_>>()
                    .join(", ");
                RecordStoreError::ValidationFailed(format!(
                    "invalid sort field '{name}', expected one of: {allowed}"
                ))
            })
    }
}

/// Core trait for a record held in a collection.
///
/// # Example
///
/// ```ignore
/// impl Record for Todo {
///     type Field = TodoField;
///     type Draft = TodoDraft;
///     type Patch = TodoPatch;
///
///     fn id(&self) -> RecordId { self.id }
///     fn collection_name() -> &'static str { "todos" }
///     fn record_name() -> &'static str { "todo" }
///     // ...
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned + Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Closed set of fields usable for filtering, searching and sorting.
    type Field: RecordField;
    /// Payload for create and full replace.
    type Draft: DeserializeOwned + Debug + Send + Sync + 'static;
    /// Payload for partial merge. Every field is optional.
    type Patch: DeserializeOwned + Debug + Send + Sync + 'static;

    /// Returns this record's identifier.
    fn id(&self) -> RecordId;

    /// Returns the plural collection name (e.g. "todos").
    fn collection_name() -> &'static str;

    /// Returns the singular record name (e.g. "todo").
    fn record_name() -> &'static str;

    /// Returns the value of one field.
    fn field(&self, field: Self::Field) -> FieldValue<'_>;

    /// Returns the last modification time, for kinds that track one.
    ///
    /// Updates are stamped strictly after it, whatever the clock reports.
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Checks that a draft carries every required field.
    fn validate_draft(draft: &Self::Draft) -> RecordStoreResult<()>;

    /// Checks the fields a patch supplies. Omitted fields are never validated.
    fn validate_patch(_patch: &Self::Patch) -> RecordStoreResult<()> {
        Ok(())
    }

    /// Builds a new record from a validated draft.
    fn from_draft(id: RecordId, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Builds the full replacement of this record. Fields absent from the draft take
    /// their type default; identity and creation time are kept.
    fn replaced_by(&self, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Overlays the supplied patch fields onto this record.
    fn merged_with(&self, patch: Self::Patch, now: DateTime<Utc>) -> Self;

    /// Returns the name of a unique field this record shares with `other`, if any.
    fn conflict_with(&self, _other: &Self) -> Option<&'static str> {
        None
    }
}

/// Requires an optional text field to be present and non-empty.
///
/// # Errors
///
/// Returns [`RecordStoreError::ValidationFailed`] naming the field otherwise.
pub fn require_text(field: &str, value: Option<&str>) -> RecordStoreResult<()> {
    match value {
        Some(text) if !text.is_empty() => Ok(()),
        _ => Err(RecordStoreError::ValidationFailed(format!("{field} is required"))),
    }
}

/// Requires a text field to be non-empty when it is supplied.
pub fn reject_empty_text(field: &str, value: Option<&str>) -> RecordStoreResult<()> {
    match value {
        Some("") => Err(RecordStoreError::ValidationFailed(format!("{field} must not be empty"))),
        _ => Ok(()),
    }
}

/// Requires an optional reference to be present and positive.
pub fn require_positive(field: &str, value: Option<i64>) -> RecordStoreResult<()> {
    match value {
        Some(id) if id > 0 => Ok(()),
        Some(_) => Err(RecordStoreError::ValidationFailed(format!("{field} must be positive"))),
        None => Err(RecordStoreError::ValidationFailed(format!("{field} is required"))),
    }
}
