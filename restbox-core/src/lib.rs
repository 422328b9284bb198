//! Core traits and types for the restbox resource engine.
//!
//! This crate defines everything a collection backend needs to know about the
//! records it holds, without committing to a storage strategy:
//!
//! - **Records** ([`record`]) - The [`Record`](record::Record) trait and closed field enumerations
//! - **Field values** ([`value`]) - Borrowed field values with type-dependent comparison rules
//! - **Query model** ([`query`]) - Equality filters, free-text search, sorting and pagination
//! - **Pagination** ([`page`]) - Windowed pages and the list result envelope
//! - **Collection store** ([`collection`]) - The ordered, id-allocating record sequence
//! - **Backend abstraction** ([`backend`]) - Async interface over a serialized collection
//! - **Clock** ([`clock`]) - Injectable time source for mutation timestamps
//! - **Error handling** ([`error`]) - The four error kinds surfaced to callers
//!
//! # Example
//!
//! ```ignore
//! use restbox_core::query::{Filter, Query, SortDirection};
//!
//! let query = Query::builder()
//!     .filter(Filter::eq(TodoField::UserId, 1))
//!     .search("review")
//!     .sort(TodoField::Title, SortDirection::Desc)
//!     .build();
//! ```

pub mod backend;
pub mod clock;
pub mod collection;
pub mod error;
pub mod page;
pub mod query;
pub mod record;
pub mod value;
