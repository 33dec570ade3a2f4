//! JSON seed data for the in-memory stores.

use std::path::Path;

use pagewright_application::Repository;
use pagewright_core::{AppError, AppResult, Entity};
use pagewright_domain::{LayoutArea, User, Webpage, Widget};
use serde::Deserialize;
use tracing::info;

/// Contents of a seed file. Every list is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    /// Locally stored users.
    pub users: Vec<User>,
    /// Users known only to the external directory.
    pub external_users: Vec<User>,
    /// Webpages.
    pub webpages: Vec<Webpage>,
    /// Widgets placed on webpages.
    pub widgets: Vec<Widget>,
    /// Layout areas.
    pub layout_areas: Vec<LayoutArea>,
}

impl SeedData {
    /// Parses seed data from JSON text.
    pub fn parse(json: &str) -> AppResult<Self> {
        serde_json::from_str(json)
            .map_err(|error| AppError::Validation(format!("invalid seed data: {error}")))
    }

    /// Reads and parses a seed file.
    pub async fn load(path: &Path) -> AppResult<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to read seed file '{}': {error}",
                path.display()
            ))
        })?;

        Self::parse(&json)
    }
}

/// Adds `rows` to `repository` in order and returns how many were stored.
pub async fn seed_repository<T, R>(repository: &R, rows: Vec<T>) -> AppResult<usize>
where
    T: Entity,
    R: Repository<T> + ?Sized,
{
    let count = rows.len();
    for row in rows {
        repository.add(row).await?;
    }

    info!(kind = T::KIND, count, "seeded repository");
    Ok(count)
}

#[cfg(test)]
mod tests;
