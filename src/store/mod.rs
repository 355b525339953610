//! Record storage: one [`Store`] per entity kind, backed by memory or PostgreSQL.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{connect, ensure_schema, PgStore};

use crate::error::AppError;
use crate::model::Entity;
use async_trait::async_trait;

pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 200;

/// Pagination window for [`Store::list`]. Construct with [`ListParams::new`]
/// so the window is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub limit: i64,
    pub offset: i64,
}

impl ListParams {
    /// Limit outside `1..=200` becomes 50; negative offset becomes 0.
    pub fn new(limit: i64, offset: i64) -> Self {
        let limit = if limit <= 0 || limit > MAX_LIMIT {
            DEFAULT_LIMIT
        } else {
            limit
        };
        ListParams {
            limit,
            offset: offset.max(0),
        }
    }
}

impl Default for ListParams {
    fn default() -> Self {
        ListParams {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// CRUD over one entity kind. Identifiers are assigned by the store, strictly
/// increasing and never reused. Callers always receive owned copies.
#[async_trait]
pub trait Store<E: Entity>: Send + Sync {
    /// Ignores any id in `input`; sets `created_at = updated_at = now`.
    async fn create(&self, input: E::Input) -> Result<E, AppError>;

    async fn get_by_id(&self, id: i64) -> Result<E, AppError>;

    /// Newest first (id descending). An offset past the end yields an empty list.
    async fn list(&self, params: ListParams) -> Result<Vec<E>, AppError>;

    async fn update(&self, id: i64, patch: E::Input) -> Result<E, AppError>;

    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
