//! Backend abstraction for a single resource collection.
//!
//! The [`CollectionBackend`] trait is the engine's contract towards the boundary: one
//! async method per read or mutation, each atomic with respect to the collection.
//!
//! # Traits
//!
//! - [`CollectionBackend`]: Reads and mutations over one collection
//! - [`CollectionBackendBuilder`]: Factory trait for creating backend instances
//!
//! # Examples
//!
//! ```ignore
//! use restbox_core::backend::CollectionBackend;
//!
//! let todo = backend.get(3).await?;
//! let removed = backend.delete_where(Some(Filter::eq(TodoField::UserId, 1))).await?;
//! ```

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::RecordStoreResult,
    page::Listing,
    query::{Expr, Query},
    record::{Record, RecordId},
};

/// Abstract interface for a collection of records of kind `R`.
///
/// # Atomicity
///
/// Each method either applies completely or not at all, and no read observes a
/// mutation in progress. Operations on different collections are independent.
///
/// # Error Handling
///
/// Absence of a record is reported as
/// [`RecordStoreError::NotFound`](crate::error::RecordStoreError::NotFound) by the
/// id-addressed operations; list and filtered delete never fail for lack of matches.
#[async_trait]
pub trait CollectionBackend<R: Record>: Send + Sync + Debug {
    /// Runs a read query: filter, search, sort, paginate.
    async fn list(&self, query: Query<R::Field>) -> RecordStoreResult<Listing<R>>;

    /// Retrieves one record by id.
    async fn get(&self, id: RecordId) -> RecordStoreResult<R>;

    /// Validates a draft, assigns a fresh id and appends the new record.
    async fn create(&self, draft: R::Draft) -> RecordStoreResult<R>;

    /// Replaces every mutable field of an existing record.
    async fn replace(&self, id: RecordId, draft: R::Draft) -> RecordStoreResult<R>;

    /// Overlays the supplied fields onto an existing record.
    async fn merge(&self, id: RecordId, patch: R::Patch) -> RecordStoreResult<R>;

    /// Removes one record and returns it.
    async fn delete(&self, id: RecordId) -> RecordStoreResult<R>;

    /// Removes every record matching `filter` (every record if `None`).
    ///
    /// Returns the number of records removed.
    async fn delete_where(&self, filter: Option<Expr<R::Field>>) -> RecordStoreResult<usize>;

    /// Discards all records and the id counter and reloads the seed records.
    async fn reset(&self) -> RecordStoreResult<()>;
}

/// Factory trait for creating backend instances.
#[async_trait]
pub trait CollectionBackendBuilder<R: Record>: Send {
    type Backend: CollectionBackend<R>;

    async fn build(self) -> RecordStoreResult<Self::Backend>;
}
