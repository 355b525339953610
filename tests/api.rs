//! Drives the full router against the in-memory backend.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use pos_api::{app, extractors::MAX_BODY_BYTES, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    app(AppState::in_memory("/nonexistent/openapi.json"))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<String>) -> anyhow::Result<(StatusCode, Value)> {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map(Body::from).unwrap_or_else(Body::empty))?;
    let res = app.clone().oneshot(req).await?;
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

async fn post(app: &Router, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
    send(app, Method::POST, uri, Some(body.to_string())).await
}

fn ids(items: &Value) -> Vec<i64> {
    items
        .as_array()
        .map(|a| a.iter().filter_map(|i| i["id"].as_i64()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn product_lifecycle() -> anyhow::Result<()> {
    let app = test_app();

    let (status, body) = post(&app, "/api/products", json!({"name": " Widget ", "price": 9.99, "quantity": 3})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let p1 = body["data"].clone();
    assert_eq!(p1["name"], "Widget");
    assert_eq!(p1["id"], 1);
    assert_eq!(p1["price"], 9.99);
    assert_eq!(p1["quantity"], 3);
    assert_eq!(p1["created_at"], p1["updated_at"]);

    let (_, body) = post(&app, "/api/products", json!({"name": "Gadget", "price": 1.5, "quantity": 1})).await?;
    assert_eq!(body["data"]["id"], 2);

    let (status, body) = send(&app, Method::GET, "/api/products", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]["items"]), vec![2, 1]);
    assert_eq!(body["data"]["limit"], 50);
    assert_eq!(body["data"]["offset"], 0);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/products/1",
        Some(json!({"name": "Widget2", "price": 10.99, "quantity": 5}).to_string()),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let updated = &body["data"];
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["name"], "Widget2");
    assert_eq!(updated["quantity"], 5);
    assert_eq!(updated["created_at"], p1["created_at"]);
    let created: chrono::DateTime<chrono::Utc> = serde_json::from_value(updated["created_at"].clone())?;
    let refreshed: chrono::DateTime<chrono::Utc> = serde_json::from_value(updated["updated_at"].clone())?;
    assert!(refreshed > created);

    let (status, body) = send(&app, Method::DELETE, "/api/products/2", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": {"deleted": true}}));

    let (status, body) = send(&app, Method::GET, "/api/products/2", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "error": "not found"}));

    let (_, body) = send(&app, Method::GET, "/api/products", None).await?;
    assert_eq!(ids(&body["data"]["items"]), vec![1]);
    Ok(())
}

#[tokio::test]
async fn category_lifecycle_trims_both_text_fields() -> anyhow::Result<()> {
    let app = test_app();

    let (status, body) = post(&app, "/api/categories", json!({"name": "  Drinks", "description": " cold ones  "})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Drinks");
    assert_eq!(body["data"]["description"], "cold ones");

    let (status, body) = send(&app, Method::GET, "/api/categories/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Drinks");

    let (status, _) = send(&app, Method::DELETE, "/api/categories/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, Method::DELETE, "/api/categories/1", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "not found");
    Ok(())
}

#[tokio::test]
async fn entity_kinds_have_independent_ids() -> anyhow::Result<()> {
    let app = test_app();
    post(&app, "/api/products", json!({"name": "a"})).await?;
    post(&app, "/api/products", json!({"name": "b"})).await?;
    let (_, body) = post(&app, "/api/categories", json!({"name": "c"})).await?;
    assert_eq!(body["data"]["id"], 1);
    Ok(())
}

#[tokio::test]
async fn list_pagination_window() -> anyhow::Result<()> {
    let app = test_app();
    for i in 0..60 {
        post(&app, "/api/products", json!({"name": format!("p{i}")})).await?;
    }

    let (_, body) = send(&app, Method::GET, "/api/products?limit=0", None).await?;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(50));

    let (_, body) = send(&app, Method::GET, "/api/products?limit=500", None).await?;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(50));
    assert_eq!(body["data"]["limit"], 500);

    let (_, body) = send(&app, Method::GET, "/api/products?limit=abc&offset=xyz", None).await?;
    assert_eq!(body["data"]["limit"], 50);
    assert_eq!(body["data"]["offset"], 0);
    assert_eq!(ids(&body["data"]["items"])[0], 60);

    let (_, body) = send(&app, Method::GET, "/api/products?limit=3&offset=2", None).await?;
    assert_eq!(ids(&body["data"]["items"]), vec![58, 57, 56]);

    let (status, body) = send(&app, Method::GET, "/api/products?offset=1000", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["items"], json!([]));
    Ok(())
}

#[tokio::test]
async fn update_of_missing_record_changes_nothing() -> anyhow::Result<()> {
    let app = test_app();
    post(&app, "/api/products", json!({"name": "only"})).await?;

    let (status, body) = send(&app, Method::PUT, "/api/products/9", Some(json!({"name": "x"}).to_string())).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, Method::GET, "/api/products", None).await?;
    assert_eq!(ids(&body["data"]["items"]), vec![1]);
    assert_eq!(body["data"]["items"][0]["name"], "only");
    Ok(())
}

#[tokio::test]
async fn bad_requests_use_error_envelope() -> anyhow::Result<()> {
    let app = test_app();

    for (method, uri) in [
        (Method::GET, "/api/products/abc"),
        (Method::DELETE, "/api/categories/1x"),
        (Method::GET, "/api/products/"),
        (Method::GET, "/api/products/1/2"),
        (Method::PUT, "/api/categories/"),
        (Method::DELETE, "/api/products/1/2/3"),
    ] {
        let (status, body) = send(&app, method, uri, None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"success": false, "error": "invalid id"}));
    }

    let (status, body) = send(&app, Method::GET, "/api/nothing", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::PUT, "/api/products/abc", Some("{}".into())).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid id");

    let (status, body) = send(&app, Method::POST, "/api/products", Some("{not json".into())).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().starts_with("invalid json: "));

    let (status, body) = post(&app, "/api/products", json!({"name": "a", "barcode": "123"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("unknown field `barcode`"));

    let (status, body) = post(&app, "/api/categories", json!({"name": 5})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(&app, Method::POST, "/api/products", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid json: EOF");

    let (status, body) = send(&app, Method::POST, "/api/products", Some("[1]".into())).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let huge = json!({"name": "a".repeat(MAX_BODY_BYTES)}).to_string();
    let (status, body) = send(&app, Method::POST, "/api/products", Some(huge)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().starts_with("invalid json: "));

    let (_, body) = send(&app, Method::GET, "/api/products", None).await?;
    assert_eq!(body["data"]["items"], json!([]));
    Ok(())
}

#[tokio::test]
async fn loose_bodies_decode_like_missing_fields() -> anyhow::Result<()> {
    let app = test_app();

    let (status, body) = post(&app, "/api/products", json!({"Name": "Cased", "PRICE": 9.999, "quantity": null})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Cased");
    assert_eq!(body["data"]["price"], 9.999);
    assert_eq!(body["data"]["quantity"], 0);

    let (status, body) = post(&app, "/api/categories", json!({"name": "c", "description": null})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["description"], "");

    let (status, body) = send(&app, Method::POST, "/api/categories", Some("null".into())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "");
    Ok(())
}

#[tokio::test]
async fn body_without_content_type_is_accepted() -> anyhow::Result<()> {
    let app = test_app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/categories")
        .body(Body::from(r#"{"name":"Plain"}"#))?;
    let res = app.oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn health_and_docs() -> anyhow::Result<()> {
    let app = test_app();

    for method in [Method::GET, Method::POST, Method::DELETE] {
        let (status, body) = send(&app, method, "/health", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "OK", "message": "API Running"}));
    }

    let (status, body) = send(&app, Method::GET, "/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("openapi").is_some());

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/docs/").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()), Some("/docs"));

    let res = app
        .clone()
        .oneshot(Request::builder().uri("/docs/anything/deeper").body(Body::empty())?)
        .await?;
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()), Some("/docs"));

    let res = app.oneshot(Request::builder().uri("/docs").body(Body::empty())?).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let html = axum::body::to_bytes(res.into_body(), usize::MAX).await?;
    assert!(String::from_utf8_lossy(&html).contains("/openapi.json"));
    Ok(())
}

#[tokio::test]
async fn static_openapi_file_is_served_verbatim() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("pos-api-openapi-{}.json", std::process::id()));
    tokio::fs::write(&path, r#"{"openapi":"3.0.3","info":{"title":"static"}}"#).await?;
    let app = app(AppState::in_memory(path.clone()));

    let (status, body) = send(&app, Method::GET, "/openapi.json", None).await?;
    tokio::fs::remove_file(&path).await.ok();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "static");
    Ok(())
}
