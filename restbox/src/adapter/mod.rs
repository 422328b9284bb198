//! The boundary adapter.
//!
//! Translates untyped input (query-string pairs, path ids, raw JSON bodies) into engine
//! queries and mutations, and engine results and errors into [`Response`]s.

pub mod handler;
pub mod params;
pub mod response;

pub use handler::ResourceHandler;
pub use params::QueryParams;
pub use response::Response;
