//! Request handling for one resource kind.
//!
//! Every method takes raw input and always produces a [`Response`]; engine errors are
//! mapped to their status codes here and never escape.

use serde::de::DeserializeOwned;
use serde_json::json;
use std::marker::PhantomData;

use restbox_core::{
    backend::CollectionBackend,
    error::{RecordStoreError, RecordStoreResult},
    query::Filter,
    record::{Record, RecordId},
};

use crate::{
    adapter::{QueryParams, Response},
    resources::Resource,
};

/// Boundary adapter over the backend `B` holding records of kind `R`.
#[derive(Debug, Clone)]
pub struct ResourceHandler<R: Resource, B: CollectionBackend<R>> {
    backend: B,
    _marker: PhantomData<R>,
}

impl<R: Resource, B: CollectionBackend<R>> ResourceHandler<R, B> {
    pub fn new(backend: B) -> Self {
        Self { backend, _marker: PhantomData }
    }

    /// Returns the typed backend behind this handler.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// List: filters, search, sort and pagination from query parameters.
    pub async fn list(&self, params: &QueryParams) -> Response {
        let result = async {
            let listing = self.backend.list(params.to_query::<R>()?).await?;
            Response::json(&listing)
        };

        result.await.unwrap_or_else(Response::from_error)
    }

    /// Get by id.
    pub async fn get(&self, raw_id: &str) -> Response {
        let result = async {
            let record = self.backend.get(parse_id::<R>(raw_id)?).await?;
            Response::json(&record)
        };

        result.await.unwrap_or_else(Response::from_error)
    }

    /// Create from a JSON body. Responds 201 with the new record.
    pub async fn create(&self, body: &str) -> Response {
        let result = async {
            let record = self.backend.create(parse_body(body)?).await?;
            Ok::<_, RecordStoreError>(Response::created(serde_json::to_value(&record)?))
        };

        result.await.unwrap_or_else(Response::from_error)
    }

    /// Full replace from a JSON body.
    pub async fn replace(&self, raw_id: &str, body: &str) -> Response {
        let result = async {
            let id = parse_id::<R>(raw_id)?;
            let record = self.backend.replace(id, parse_body(body)?).await?;
            Response::json(&record)
        };

        result.await.unwrap_or_else(Response::from_error)
    }

    /// Partial merge from a JSON body.
    pub async fn merge(&self, raw_id: &str, body: &str) -> Response {
        let result = async {
            let id = parse_id::<R>(raw_id)?;
            let record = self.backend.merge(id, parse_body(body)?).await?;
            Response::json(&record)
        };

        result.await.unwrap_or_else(Response::from_error)
    }

    /// Delete by id. Responds with the removed record.
    pub async fn delete(&self, raw_id: &str) -> Response {
        let result = async {
            let record = self.backend.delete(parse_id::<R>(raw_id)?).await?;
            let mut body = json!({ "message": format!("{} deleted successfully", capitalized(R::record_name())) });
            body[R::record_name()] = serde_json::to_value(&record)?;
            Ok::<_, RecordStoreError>(Response::ok(body))
        };

        result.await.unwrap_or_else(Response::from_error)
    }

    /// Delete filtered or reset.
    ///
    /// With filter parameters, removes the matching records and reports the count.
    /// Without any, resets the collection to its seed records.
    pub async fn delete_many(&self, params: &QueryParams) -> Response {
        let result = async {
            let filters = R::filters(params)?;

            if filters.is_empty() {
                self.backend.reset().await?;

                return Ok(Response::ok(json!({
                    "message": format!("All {} reset to initial state", R::collection_name()),
                })));
            }

            let deleted = self.backend.delete_where(Some(Filter::and(filters))).await?;

            Ok::<_, RecordStoreError>(Response::ok(json!({
                "message": format!("Deleted {deleted} {}", R::collection_name()),
                "deletedCount": deleted,
            })))
        };

        result.await.unwrap_or_else(Response::from_error)
    }
}

/// Parses a path id. Anything that is not a positive integer names no record.
fn parse_id<R: Record>(raw: &str) -> RecordStoreResult<RecordId> {
    raw.parse::<RecordId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| RecordStoreError::not_found(raw, R::collection_name()))
}

fn parse_body<T: DeserializeOwned>(body: &str) -> RecordStoreResult<T> {
    if body.trim().is_empty() {
        return Err(RecordStoreError::BadRequest("request body is empty".into()));
    }

    Ok(serde_json::from_str(body)?)
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
