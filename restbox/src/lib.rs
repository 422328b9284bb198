//! Main restbox crate: the Todo and User resources and the boundary around them.
//!
//! This crate wires two in-memory collections, one per resource kind, to a request/response
//! boundary that accepts raw query parameters and raw JSON bodies:
//!
//! - **Resources** ([`resources`]) - Todo and User records with their drafts and patches
//! - **Seed data** ([`seed`]) - The fixed records every collection starts from and resets to
//! - **Boundary adapter** ([`adapter`]) - Parameter parsing, body decoding and status mapping
//! - **Composition root** ([`api`]) - One store instance per resource kind
//! - **HTTP transport** (`http`, requires the `http` feature) - axum routes over the adapter
//!
//! # Quick Start
//!
//! ```ignore
//! use restbox::{api::Api, adapter::QueryParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Api::builder().build().await?;
//!
//!     let response = api
//!         .todos()
//!         .list(&QueryParams::from_pairs([("userId", "1"), ("sort", "title")]))
//!         .await;
//!
//!     assert_eq!(response.status, 200);
//!     println!("{}", response.body);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Serving over HTTP
//!
//! ```ignore
//! let api = std::sync::Arc::new(restbox::api::Api::builder().build().await?);
//! restbox::http::serve(api, "0.0.0.0:3000").await?;
//! ```

pub mod adapter;
pub mod api;
pub mod prelude;
pub mod resources;
pub mod seed;

#[cfg(feature = "http")]
pub mod http;

pub use restbox_core::{backend, clock, collection, error, page, query, record, value};

/// In-memory collection backend.
pub mod memory {
    pub use restbox_memory::{InMemoryCollection, InMemoryCollectionBuilder, MutationPolicy, engine};
}
