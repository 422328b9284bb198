//! In-memory collection handle.
//!
//! [`InMemoryCollection`] owns one [`Collection`] behind an async-aware read-write lock.
//! Reads share the lock; every mutation holds it exclusively for its whole duration, so
//! a read never observes a half-applied write and writers never interleave.

use async_trait::async_trait;
use mea::rwlock::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

use restbox_core::{
    backend::{CollectionBackend, CollectionBackendBuilder},
    clock::{Clock, SystemClock},
    collection::Collection,
    error::{RecordStoreError, RecordStoreResult},
    page::Listing,
    query::{Expr, Query},
    record::{Record, RecordId},
};

use crate::{engine, mutation::{self, MutationPolicy}};

/// Thread-safe in-memory collection of records of kind `R`.
///
/// Cloning is cheap and every clone shares the same underlying collection.
///
/// # Example
///
/// ```ignore
/// use restbox_memory::InMemoryCollection;
///
/// let todos = InMemoryCollection::<Todo>::builder()
///     .with_seed(seed_todos())
///     .build()
///     .await?;
///
/// let created = todos.create(draft).await?;
/// assert_eq!(todos.get(created.id).await?, created);
/// ```
#[derive(Clone, Debug)]
pub struct InMemoryCollection<R: Record> {
    inner: Arc<RwLock<Collection<R>>>,
    clock: Arc<dyn Clock>,
    policy: MutationPolicy,
}

impl<R: Record> InMemoryCollection<R> {
    /// Creates a collection initialized from `seed`, using the system clock.
    pub fn new(seed: Vec<R>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collection::initialize_from_seed(seed))),
            clock: Arc::new(SystemClock),
            policy: MutationPolicy::default(),
        }
    }

    /// Creates a builder for constructing an `InMemoryCollection` with custom options.
    pub fn builder() -> InMemoryCollectionBuilder<R> {
        InMemoryCollectionBuilder::default()
    }

    /// Returns the number of records currently held.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Returns `true` if the collection holds no records.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Returns a copy of the current record sequence.
    pub async fn snapshot(&self) -> Vec<R> {
        self.inner.read().await.snapshot().to_vec()
    }

    fn rejected(operation: &str, err: &RecordStoreError) {
        debug!(collection = R::collection_name(), operation, error = %err, "mutation rejected");
    }
}

#[async_trait]
impl<R: Record> CollectionBackend<R> for InMemoryCollection<R> {
    async fn list(&self, query: Query<R::Field>) -> RecordStoreResult<Listing<R>> {
        let collection = self.inner.read().await;
        let listing = engine::execute(collection.snapshot(), &query)?;

        debug!(
            collection = R::collection_name(),
            returned = listing.items().len(),
            "listed records"
        );

        Ok(listing)
    }

    async fn get(&self, id: RecordId) -> RecordStoreResult<R> {
        self.inner
            .read()
            .await
            .find(id)
            .cloned()
            .ok_or_else(|| RecordStoreError::not_found(id, R::collection_name()))
    }

    async fn create(&self, draft: R::Draft) -> RecordStoreResult<R> {
        let mut collection = self.inner.write().await;

        mutation::create(&mut collection, draft, self.clock.now())
            .inspect(|record| info!(collection = R::collection_name(), id = record.id(), "record created"))
            .inspect_err(|err| Self::rejected("create", err))
    }

    async fn replace(&self, id: RecordId, draft: R::Draft) -> RecordStoreResult<R> {
        let mut collection = self.inner.write().await;

        mutation::replace(&mut collection, id, draft, self.clock.now(), self.policy)
            .inspect(|_| info!(collection = R::collection_name(), id, "record replaced"))
            .inspect_err(|err| Self::rejected("replace", err))
    }

    async fn merge(&self, id: RecordId, patch: R::Patch) -> RecordStoreResult<R> {
        let mut collection = self.inner.write().await;

        mutation::merge(&mut collection, id, patch, self.clock.now(), self.policy)
            .inspect(|_| info!(collection = R::collection_name(), id, "record merged"))
            .inspect_err(|err| Self::rejected("merge", err))
    }

    async fn delete(&self, id: RecordId) -> RecordStoreResult<R> {
        let mut collection = self.inner.write().await;

        mutation::delete(&mut collection, id)
            .inspect(|_| info!(collection = R::collection_name(), id, "record deleted"))
            .inspect_err(|err| Self::rejected("delete", err))
    }

    async fn delete_where(&self, filter: Option<Expr<R::Field>>) -> RecordStoreResult<usize> {
        let mut collection = self.inner.write().await;

        mutation::delete_where(&mut collection, filter.as_ref())
            .inspect(|count| info!(collection = R::collection_name(), count, "records deleted"))
    }

    async fn reset(&self) -> RecordStoreResult<()> {
        self.inner
            .write()
            .await
            .reset_to_seed();

        info!(collection = R::collection_name(), "collection reset to seed");

        Ok(())
    }
}

/// Builder for constructing [`InMemoryCollection`] instances.
///
/// # Example
///
/// ```ignore
/// let users = InMemoryCollection::<User>::builder()
///     .with_seed(seed_users())
///     .with_policy(MutationPolicy { recheck_unique_on_update: true })
///     .build()
///     .await?;
/// ```
#[derive(Debug)]
pub struct InMemoryCollectionBuilder<R: Record> {
    seed: Vec<R>,
    clock: Option<Arc<dyn Clock>>,
    policy: MutationPolicy,
}

impl<R: Record> Default for InMemoryCollectionBuilder<R> {
    fn default() -> Self {
        Self {
            seed: Vec::new(),
            clock: None,
            policy: MutationPolicy::default(),
        }
    }
}

impl<R: Record> InMemoryCollectionBuilder<R> {
    /// Sets the records the collection starts from and resets to.
    pub fn with_seed(mut self, seed: Vec<R>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the time source for mutation timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the mutation policy.
    pub fn with_policy(mut self, policy: MutationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl<R: Record> CollectionBackendBuilder<R> for InMemoryCollectionBuilder<R> {
    type Backend = InMemoryCollection<R>;

    /// Builds a collection initialized from the configured seed.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::ValidationFailed`] if two seed records share an id.
    async fn build(self) -> RecordStoreResult<Self::Backend> {
        let mut ids = std::collections::HashSet::new();

        if let Some(duplicate) = self.seed.iter().map(R::id).find(|id| !ids.insert(*id)) {
            return Err(RecordStoreError::ValidationFailed(format!(
                "seed for {} contains id {duplicate} more than once",
                R::collection_name()
            )));
        }

        Ok(InMemoryCollection {
            inner: Arc::new(RwLock::new(Collection::initialize_from_seed(self.seed))),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            policy: self.policy,
        })
    }
}
