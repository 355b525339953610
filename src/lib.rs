//! POS API: CRUD backend for point-of-sale products and categories, backed by
//! an in-memory store or PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{Backend, Config};
pub use error::{AppError, ConfigError};
pub use model::{Category, CategoryInput, Entity, Product, ProductInput};
pub use routes::{app, common_routes, docs_routes, entity_routes};
pub use service::EntityService;
pub use state::{AppState, Seed};
pub use store::{ensure_schema, ListParams, MemoryStore, PgStore, Store};
