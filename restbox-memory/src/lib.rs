//! In-memory collection backend for restbox.
//!
//! This crate provides the thread-safe, in-memory implementation of the
//! `CollectionBackend` trait, along with the two engines it is built from:
//!
//! - **Query engine** ([`engine`]) - Pure filter, search, sort and paginate over a snapshot
//! - **Filter evaluation** ([`evaluator`]) - Expression evaluation against typed records
//! - **Mutation engine** ([`mutation`]) - Validated create, replace, merge and delete
//! - **Collection handle** ([`store`]) - One async read-write lock per collection
//!
//! # Quick Start
//!
//! ```ignore
//! use restbox_memory::InMemoryCollection;
//! use restbox_core::{backend::{CollectionBackend, CollectionBackendBuilder}, query::Query};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let todos = InMemoryCollection::<Todo>::builder()
//!         .with_seed(seed_todos())
//!         .build()
//!         .await?;
//!
//!     let listing = todos.list(Query::new()).await?;
//!     println!("{} todos", listing.items().len());
//!
//!     Ok(())
//! }
//! ```

pub mod engine;
pub mod evaluator;
pub mod mutation;
pub mod store;

#[cfg(test)]
pub(crate) mod fixtures;

pub use mutation::MutationPolicy;
pub use store::{InMemoryCollection, InMemoryCollectionBuilder};
