use std::collections::BTreeMap;

use async_trait::async_trait;
use pagewright_application::{Predicate, Repository};
use pagewright_core::{AppError, AppResult, Entity, EntityId};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug)]
struct Store<T> {
    rows: BTreeMap<EntityId, T>,
    next_id: i64,
}

/// In-memory repository implementation.
///
/// Entities added without an identity receive the next sequential id,
/// starting at 1. Entities that already carry an identity keep it.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    store: RwLock<Store<T>>,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Returns the number of stored entities.
    pub async fn len(&self) -> usize {
        self.store.read().await.rows.len()
    }

    /// Returns whether the repository holds no entities.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.rows.is_empty()
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn get(&self, id: EntityId) -> AppResult<Option<T>> {
        Ok(self.store.read().await.rows.get(&id).cloned())
    }

    async fn query(&self, predicate: &Predicate<'_, T>) -> AppResult<Vec<T>> {
        Ok(self
            .store
            .read()
            .await
            .rows
            .values()
            .filter(|row| predicate(*row))
            .cloned()
            .collect())
    }

    async fn add(&self, mut entity: T) -> AppResult<T> {
        let mut store = self.store.write().await;

        let id = if entity.id().is_assigned() {
            let id = entity.id();
            if store.rows.contains_key(&id) {
                return Err(AppError::Conflict(format!(
                    "{} '{}' already exists",
                    T::KIND,
                    id
                )));
            }
            id
        } else {
            let id = EntityId::new(store.next_id);
            if store.rows.contains_key(&id) {
                return Err(AppError::Conflict(format!(
                    "no {} ids left after '{}'",
                    T::KIND,
                    id
                )));
            }
            id
        };

        // Once `i64::MAX` is taken, `next_id` stays on it and later adds conflict.
        let after = id.value().checked_add(1).unwrap_or(i64::MAX);
        store.next_id = store.next_id.max(after);
        entity.set_id(id);
        store.rows.insert(id, entity.clone());

        debug!(kind = T::KIND, id = %id, "entity added");
        Ok(entity)
    }

    async fn update(&self, entity: T) -> AppResult<()> {
        let mut store = self.store.write().await;
        let id = entity.id();
        let Some(row) = store.rows.get_mut(&id) else {
            return Err(AppError::NotFound(format!(
                "{} '{}' does not exist",
                T::KIND,
                id
            )));
        };

        *row = entity;
        debug!(kind = T::KIND, id = %id, "entity updated");
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> AppResult<()> {
        if self.store.write().await.rows.remove(&id).is_some() {
            debug!(kind = T::KIND, id = %id, "entity deleted");
        }
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.store.write().await.rows.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests;
