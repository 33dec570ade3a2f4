//! Fake ports shared by the service tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pagewright_core::{AppError, AppResult, Entity, EntityId};
use tokio::sync::Mutex;

use crate::{Clock, Predicate, Repository};

/// Fixed "now" used across service tests.
pub(crate) fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 9, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("fixed test date must be valid"))
}

pub(crate) struct FixedClock(pub(crate) DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) struct FakeRepository<T> {
    rows: Mutex<Vec<T>>,
    offline: AtomicBool,
    calls: Mutex<usize>,
    updates: Mutex<usize>,
}

impl<T: Entity> FakeRepository<T> {
    pub(crate) fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
            calls: Mutex::new(0),
            updates: Mutex::new(0),
        }
    }

    /// Makes every subsequent call fail as if the store were unreachable.
    pub(crate) fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub(crate) async fn call_count(&self) -> usize {
        *self.calls.lock().await
    }

    pub(crate) async fn update_count(&self) -> usize {
        *self.updates.lock().await
    }

    async fn check_online(&self) -> AppResult<()> {
        *self.calls.lock().await += 1;
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::Internal("store unavailable".to_owned()));
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for FakeRepository<T> {
    async fn get(&self, id: EntityId) -> AppResult<Option<T>> {
        self.check_online().await?;
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .find(|row| row.id() == id)
            .cloned())
    }

    async fn query(&self, predicate: &Predicate<'_, T>) -> AppResult<Vec<T>> {
        self.check_online().await?;
        Ok(self
            .rows
            .lock()
            .await
            .iter()
            .filter(|row| predicate(*row))
            .cloned()
            .collect())
    }

    async fn add(&self, mut entity: T) -> AppResult<T> {
        self.check_online().await?;
        let mut rows = self.rows.lock().await;
        let next_id = rows.iter().map(|row| row.id().value()).max().unwrap_or(0) + 1;
        entity.set_id(EntityId::new(next_id));
        rows.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> AppResult<()> {
        self.check_online().await?;
        *self.updates.lock().await += 1;
        let mut rows = self.rows.lock().await;
        let Some(row) = rows.iter_mut().find(|row| row.id() == entity.id()) else {
            return Err(AppError::NotFound(format!("{} '{}'", T::KIND, entity.id())));
        };
        *row = entity;
        Ok(())
    }

    async fn delete(&self, id: EntityId) -> AppResult<()> {
        self.check_online().await?;
        self.rows.lock().await.retain(|row| row.id() != id);
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        self.check_online().await?;
        self.rows.lock().await.clear();
        Ok(())
    }
}
