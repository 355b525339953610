//! Router assembly.

mod common;
mod docs;
mod entity;

pub use common::common_routes;
pub use docs::docs_routes;
pub use entity::entity_routes;

use crate::error::AppError;
use crate::extractors::MAX_BODY_BYTES;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::trace::TraceLayer;

const PRODUCTS: &str = "/api/products";
const CATEGORIES: &str = "/api/categories";

/// The full application: both entity kinds under `/api`, docs and health.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(entity_routes(PRODUCTS, state.products))
        .merge(entity_routes(CATEGORIES, state.categories))
        .merge(docs_routes(state.openapi_path))
        .merge(common_routes())
        .fallback(unmatched)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

/// Paths below an entity base that are not `{base}/{id}` (an empty id or
/// extra segments) carry an id that cannot be parsed.
async fn unmatched(method: Method, uri: Uri) -> Response {
    let below_entity = [PRODUCTS, CATEGORIES]
        .iter()
        .any(|base| uri.path().strip_prefix(base).is_some_and(|rest| rest.starts_with('/')));
    if below_entity && [Method::GET, Method::PUT, Method::DELETE].contains(&method) {
        return AppError::BadRequest("invalid id".into()).into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
