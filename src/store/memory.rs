//! In-memory store: a map from id to record behind one reader/writer lock.

use super::{ListParams, Store};
use crate::error::AppError;
use crate::model::Entity;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct Inner<E> {
    next_id: i64,
    records: HashMap<i64, E>,
}

/// Holds every record of one entity kind. Reads share the lock; create,
/// update and delete take it exclusively. The lock is never held across an
/// `.await`.
pub struct MemoryStore<E> {
    inner: RwLock<Inner<E>>,
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        MemoryStore {
            inner: RwLock::new(Inner {
                next_id: 1,
                records: HashMap::new(),
            }),
        }
    }

    /// Replaces the contents with `items`. The next id continues after the
    /// largest seeded id.
    pub fn seed(&self, items: Vec<E>) -> Result<(), AppError> {
        let max_id = items.iter().map(Entity::id).max().unwrap_or(0);
        let next_id = next_after::<E>(max_id)?;
        let mut inner = self.write()?;
        inner.records = items.into_iter().map(|e| (e.id(), e)).collect();
        inner.next_id = next_id;
        tracing::debug!(kind = E::KIND, count = inner.records.len(), "seeded");
        Ok(())
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.read()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner<E>>, AppError> {
        self.inner
            .read()
            .map_err(|_| AppError::Internal(format!("{} store lock poisoned", E::KIND)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner<E>>, AppError> {
        self.inner
            .write()
            .map_err(|_| AppError::Internal(format!("{} store lock poisoned", E::KIND)))
    }
}

fn next_after<E: Entity>(id: i64) -> Result<i64, AppError> {
    id.checked_add(1)
        .ok_or_else(|| AppError::Internal(format!("{} id space exhausted", E::KIND)))
}

impl<E: Entity> Default for MemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Store<E> for MemoryStore<E> {
    async fn create(&self, input: E::Input) -> Result<E, AppError> {
        let mut inner = self.write()?;
        let id = inner.next_id;
        inner.next_id = next_after::<E>(id)?;
        let record = E::from_input(id, input, Utc::now());
        inner.records.insert(id, record.clone());
        tracing::debug!(kind = E::KIND, id, "created");
        Ok(record)
    }

    async fn get_by_id(&self, id: i64) -> Result<E, AppError> {
        self.read()?.records.get(&id).cloned().ok_or(AppError::NotFound)
    }

    async fn list(&self, params: ListParams) -> Result<Vec<E>, AppError> {
        let params = ListParams::new(params.limit, params.offset);
        let inner = self.read()?;
        let mut ids: Vec<i64> = inner.records.keys().copied().collect();
        ids.sort_unstable_by(|a, b| b.cmp(a));

        let offset = usize::try_from(params.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(params.limit).unwrap_or(0);
        Ok(ids
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|id| inner.records.get(id).cloned())
            .collect())
    }

    async fn update(&self, id: i64, patch: E::Input) -> Result<E, AppError> {
        let mut inner = self.write()?;
        let existing = inner.records.get_mut(&id).ok_or(AppError::NotFound)?;
        existing.apply(patch, Utc::now());
        tracing::debug!(kind = E::KIND, id, "updated");
        Ok(existing.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.write()?;
        inner.records.remove(&id).ok_or(AppError::NotFound)?;
        tracing::debug!(kind = E::KIND, id, "deleted");
        Ok(())
    }
}
