//! Standard response envelope helpers.

use axum::Json;
use serde::Serialize;

/// `{success: true, data: ...}`
#[derive(Serialize)]
pub struct Success<T> {
    pub success: bool,
    pub data: T,
}

/// `{success: false, error: ...}`
#[derive(Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: String) -> Self {
        ErrorBody {
            success: false,
            error,
        }
    }
}

/// One page of a list endpoint, echoing the requested window.
#[derive(Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Serialize)]
pub struct Deleted {
    pub deleted: bool,
}

pub fn success<T: Serialize>(data: T) -> Json<Success<T>> {
    Json(Success {
        success: true,
        data,
    })
}

pub fn deleted() -> Json<Success<Deleted>> {
    success(Deleted { deleted: true })
}
