//! EntityService: input normalization and pagination defaults in front of a [`Store`].

use crate::error::AppError;
use crate::model::Entity;
use crate::store::{ListParams, Store};
use std::sync::Arc;

pub struct EntityService<E: Entity> {
    store: Arc<dyn Store<E>>,
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        EntityService {
            store: Arc::clone(&self.store),
        }
    }
}

impl<E: Entity> EntityService<E> {
    pub fn new(store: Arc<dyn Store<E>>) -> Self {
        EntityService { store }
    }

    pub async fn create(&self, input: E::Input) -> Result<E, AppError> {
        self.store.create(E::normalize(input)).await
    }

    pub async fn get(&self, id: i64) -> Result<E, AppError> {
        self.store.get_by_id(id).await
    }

    /// Limit outside `1..=200` falls back to 50; negative offset becomes 0.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<E>, AppError> {
        self.store.list(ListParams::new(limit, offset)).await
    }

    pub async fn update(&self, id: i64, input: E::Input) -> Result<E, AppError> {
        self.store.update(id, E::normalize(input)).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.store.delete(id).await
    }
}
