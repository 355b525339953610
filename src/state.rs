//! Shared application state, built once at startup.

use crate::model::{Category, Product};
use crate::service::EntityService;
use crate::store::{MemoryStore, PgStore, Store};
use serde::Deserialize;
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub products: EntityService<Product>,
    pub categories: EntityService<Category>,
    /// Static OpenAPI document served at `/openapi.json`.
    pub openapi_path: PathBuf,
}

/// Initial contents for the memory backend.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl AppState {
    pub fn new(
        products: Arc<dyn Store<Product>>,
        categories: Arc<dyn Store<Category>>,
        openapi_path: impl Into<PathBuf>,
    ) -> Self {
        AppState {
            products: EntityService::new(products),
            categories: EntityService::new(categories),
            openapi_path: openapi_path.into(),
        }
    }

    /// Empty memory-backed stores.
    pub fn in_memory(openapi_path: impl Into<PathBuf>) -> Self {
        Self::new(
            Arc::new(MemoryStore::<Product>::new()),
            Arc::new(MemoryStore::<Category>::new()),
            openapi_path,
        )
    }

    /// Memory-backed stores pre-filled from `seed`.
    pub fn seeded(seed: Seed, openapi_path: impl Into<PathBuf>) -> Result<Self, crate::error::AppError> {
        let products = MemoryStore::<Product>::new();
        products.seed(seed.products)?;
        let categories = MemoryStore::<Category>::new();
        categories.seed(seed.categories)?;
        Ok(Self::new(Arc::new(products), Arc::new(categories), openapi_path))
    }

    /// Both entity kinds backed by the same PostgreSQL pool.
    pub fn postgres(pool: PgPool, openapi_path: impl Into<PathBuf>) -> Self {
        let store = PgStore::new(pool);
        Self::new(Arc::new(store.clone()), Arc::new(store), openapi_path)
    }
}
