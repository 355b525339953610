//! Entity CRUD routes: `{base}` for list/create and `{base}/:id` for
//! read/update/delete.

use crate::handlers::entity::{create, delete, list, read, update};
use crate::model::Entity;
use crate::service::EntityService;
use axum::{routing::get, Router};

pub fn entity_routes<E: Entity>(base: &str, service: EntityService<E>) -> Router {
    Router::new()
        .route(base, get(list::<E>).post(create::<E>))
        .route(
            &format!("{base}/:id"),
            get(read::<E>).put(update::<E>).delete(delete::<E>),
        )
        .with_state(service)
}
