//! OpenAPI document and browser docs viewer.

use crate::error::AppError;
use crate::openapi;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::path::PathBuf;

const DOCS_HTML: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width, initial-scale=1"/>
    <title>API Docs</title>
    <style>
      body { margin: 0; }
    </style>
    <script src="https://cdn.jsdelivr.net/npm/@scalar/api-reference"></script>
  </head>
  <body>
    <script>
      Scalar.createApiReference(document.body, {
        spec: { url: "/openapi.json" }
      })
    </script>
  </body>
</html>"#;

/// GET /openapi.json: the static file when readable, otherwise a document
/// generated from the record schemas.
pub async fn openapi_spec(State(path): State<PathBuf>) -> Result<Response, AppError> {
    let body = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "static openapi document unavailable");
            openapi::generated_json()
                .map_err(|e| AppError::Internal(e.to_string()))?
                .into_bytes()
        }
    };
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// GET /docs
pub async fn docs() -> Html<&'static str> {
    Html(DOCS_HTML)
}

/// GET /docs/: permanent redirect to `/docs`.
pub async fn docs_redirect() -> impl IntoResponse {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, "/docs")])
}
