use crate::handlers::docs::{docs, docs_redirect, openapi_spec};
use axum::{routing::get, Router};
use std::path::PathBuf;

/// GET /openapi.json and /docs. Anything under /docs/ redirects to /docs.
pub fn docs_routes(openapi_path: PathBuf) -> Router {
    Router::new()
        .route("/openapi.json", get(openapi_spec))
        .route("/docs", get(docs))
        .route("/docs/", get(docs_redirect))
        .route("/docs/*rest", get(docs_redirect))
        .with_state(openapi_path)
}
