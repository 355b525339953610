//! Extract a JSON request body, rejecting unknown fields and oversized bodies
//! with a `400 {success:false, error:"invalid json: ..."}`.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Largest accepted request body. Enforced by the router's body limit layer.
pub const MAX_BODY_BYTES: usize = 1 << 20;

/// Like `axum::Json` but without the `Content-Type` requirement, decoding only
/// the first JSON value in the body, and with rejections in the API envelope.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| invalid_json(e.body_text()))?;
        decode(&bytes).map(JsonBody)
    }
}

/// Decode the first JSON value of `bytes`. Trailing content is ignored.
///
/// Top-level object keys are matched case-insensitively (input field names
/// are all lowercase) and a bare `null` body decodes like `{}`. Any other
/// non-object value is rejected.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let mut values = serde_json::Deserializer::from_slice(bytes).into_iter::<Value>();
    let value = match values.next() {
        Some(Ok(value)) => value,
        Some(Err(e)) => return Err(invalid_json(e.to_string())),
        None => return Err(invalid_json("EOF".to_string())),
    };
    let value = match value {
        Value::Null => Value::Object(Map::new()),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, v)| (key.to_lowercase(), v))
                .collect(),
        ),
        _ => return Err(invalid_json("expected a JSON object".to_string())),
    };
    serde_json::from_value(value).map_err(|e| invalid_json(e.to_string()))
}

fn invalid_json(reason: String) -> AppError {
    AppError::BadRequest(format!("invalid json: {reason}"))
}
