//! Common routes: health.

use axum::{routing::any, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    message: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "OK",
        message: "API Running",
    })
}

/// /health, any method.
pub fn common_routes() -> Router {
    Router::new().route("/health", any(health))
}
