//! Composition root: one collection per resource kind behind its boundary adapter.
//!
//! Each collection is independent. Resetting todos leaves users untouched and the two
//! id counters never interact.

use std::sync::Arc;

use restbox_core::{backend::CollectionBackendBuilder, clock::Clock, error::RecordStoreResult};
use restbox_memory::{InMemoryCollection, MutationPolicy};
use tracing::info;

use crate::{
    adapter::ResourceHandler,
    resources::{Resource, todo::Todo, user::User},
    seed,
};

/// Handler for a resource kind backed by an in-memory collection.
pub type InMemoryHandler<R> = ResourceHandler<R, InMemoryCollection<R>>;

/// The Todo and User services.
#[derive(Debug, Clone)]
pub struct Api {
    todos: InMemoryHandler<Todo>,
    users: InMemoryHandler<User>,
}

impl Api {
    pub fn builder() -> ApiBuilder {
        ApiBuilder::default()
    }

    pub fn todos(&self) -> &InMemoryHandler<Todo> {
        &self.todos
    }

    pub fn users(&self) -> &InMemoryHandler<User> {
        &self.users
    }

    /// Returns the handler serving records of kind `R`.
    pub fn handler<R: Served>(&self) -> &InMemoryHandler<R> {
        R::handler(self)
    }
}

/// A resource kind the [`Api`] holds a collection for.
pub trait Served: Resource {
    fn handler(api: &Api) -> &InMemoryHandler<Self>;
}

impl Served for Todo {
    fn handler(api: &Api) -> &InMemoryHandler<Self> {
        api.todos()
    }
}

impl Served for User {
    fn handler(api: &Api) -> &InMemoryHandler<Self> {
        api.users()
    }
}

/// Builder for [`Api`].
///
/// Seeds default to the bundled records from [`seed`].
#[derive(Debug, Default)]
pub struct ApiBuilder {
    clock: Option<Arc<dyn Clock>>,
    policy: MutationPolicy,
    todo_seed: Option<Vec<Todo>>,
    user_seed: Option<Vec<User>>,
}

impl ApiBuilder {
    /// Sets the time source shared by both collections.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the mutation policy for both collections.
    pub fn with_policy(mut self, policy: MutationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_todo_seed(mut self, seed: Vec<Todo>) -> Self {
        self.todo_seed = Some(seed);
        self
    }

    pub fn with_user_seed(mut self, seed: Vec<User>) -> Self {
        self.user_seed = Some(seed);
        self
    }

    /// Builds both collections.
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::ValidationFailed`](restbox_core::error::RecordStoreError::ValidationFailed)
    /// if the bundled seed data cannot be decoded or a seed repeats an id.
    pub async fn build(self) -> RecordStoreResult<Api> {
        let todo_seed = match self.todo_seed {
            Some(seed) => seed,
            None => seed::todos()?,
        };
        let user_seed = match self.user_seed {
            Some(seed) => seed,
            None => seed::users()?,
        };

        info!(todos = todo_seed.len(), users = user_seed.len(), "seeding collections");

        let todos = collection(todo_seed, self.clock.clone(), self.policy).await?;
        let users = collection(user_seed, self.clock, self.policy).await?;

        Ok(Api {
            todos: ResourceHandler::new(todos),
            users: ResourceHandler::new(users),
        })
    }
}

async fn collection<R: Resource>(
    seed: Vec<R>,
    clock: Option<Arc<dyn Clock>>,
    policy: MutationPolicy,
) -> RecordStoreResult<InMemoryCollection<R>> {
    let builder = InMemoryCollection::builder().with_seed(seed).with_policy(policy);

    match clock {
        Some(clock) => builder.with_clock(clock).build().await,
        None => builder.build().await,
    }
}
