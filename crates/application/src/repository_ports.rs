//! Persistence and time ports shared by every service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use pagewright_core::{AppResult, Entity, EntityId};

/// Row filter accepted by [`Repository::query`].
pub type Predicate<'a, T> = dyn Fn(&T) -> bool + Send + Sync + 'a;

/// Repository port for keyed and filtered access to one entity kind.
///
/// Implementations return query results ordered by ascending identity.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Finds an entity by identity.
    async fn get(&self, id: EntityId) -> AppResult<Option<T>>;

    /// Returns every entity accepted by `predicate`.
    async fn query(&self, predicate: &Predicate<'_, T>) -> AppResult<Vec<T>>;

    /// Returns the lowest-identity entity accepted by `predicate`.
    async fn find_first(&self, predicate: &Predicate<'_, T>) -> AppResult<Option<T>> {
        Ok(self.query(predicate).await?.into_iter().next())
    }

    /// Stores a new entity and returns it with its assigned identity.
    async fn add(&self, entity: T) -> AppResult<T>;

    /// Replaces a stored entity. Fails with `NotFound` when it does not exist.
    async fn update(&self, entity: T) -> AppResult<()>;

    /// Removes an entity. Removing a missing entity is a no-op.
    async fn delete(&self, id: EntityId) -> AppResult<()>;

    /// Removes every entity.
    async fn delete_all(&self) -> AppResult<()>;
}

/// Source of the current instant. Injected so expiry checks are deterministic.
pub trait Clock: Send + Sync {
    /// Returns the current UTC instant.
    fn now(&self) -> DateTime<Utc>;
}
