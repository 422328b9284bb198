//! HTTP transport: axum routes over the boundary adapter.
//!
//! Requires the `http` feature.
//!
//! ## Routes
//!
//! - `GET /api/todos`, `POST /api/todos`, `DELETE /api/todos`
//! - `GET /api/todos/:id`, `PUT /api/todos/:id`, `PATCH /api/todos/:id`, `DELETE /api/todos/:id`
//! - the same seven routes under `/api/users`
//!
//! Bodies are read as raw text and decoded by the adapter, so malformed JSON yields the
//! adapter's 400 response rather than an extractor rejection.

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::info;

use crate::{
    adapter::{QueryParams, Response},
    api::{Api, Served},
    resources::{todo::Todo, user::User},
};

/// Build an axum `Router` serving both resource kinds.
pub fn router(api: Arc<Api>) -> Router {
    Router::new()
        .merge(resource_routes::<Todo>())
        .merge(resource_routes::<User>())
        .with_state(api)
}

/// Serve the API over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve(api: Arc<Api>, addr: &str) -> Result<(), std::io::Error> {
    let app = router(api);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "restbox listening");
    axum::serve(listener, app).await
}

fn resource_routes<R: Served>() -> Router<Arc<Api>> {
    let collection = format!("/api/{}", R::collection_name());
    let member = format!("{collection}/:id");

    Router::new()
        .route(&collection, get(list::<R>).post(create::<R>).delete(delete_many::<R>))
        .route(
            &member,
            get(fetch::<R>).put(replace::<R>).patch(merge::<R>).delete(delete::<R>),
        )
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.body)).into_response()
    }
}

async fn list<R: Served>(
    State(api): State<Arc<Api>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    api.handler::<R>().list(&QueryParams::from(params)).await
}

async fn fetch<R: Served>(State(api): State<Arc<Api>>, Path(id): Path<String>) -> Response {
    api.handler::<R>().get(&id).await
}

async fn create<R: Served>(State(api): State<Arc<Api>>, body: String) -> Response {
    api.handler::<R>().create(&body).await
}

async fn replace<R: Served>(
    State(api): State<Arc<Api>>,
    Path(id): Path<String>,
    body: String,
) -> Response {
    api.handler::<R>().replace(&id, &body).await
}

async fn merge<R: Served>(
    State(api): State<Arc<Api>>,
    Path(id): Path<String>,
    body: String,
) -> Response {
    api.handler::<R>().merge(&id, &body).await
}

async fn delete<R: Served>(State(api): State<Arc<Api>>, Path(id): Path<String>) -> Response {
    api.handler::<R>().delete(&id).await
}

async fn delete_many<R: Served>(
    State(api): State<Arc<Api>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    api.handler::<R>().delete_many(&QueryParams::from(params)).await
}
