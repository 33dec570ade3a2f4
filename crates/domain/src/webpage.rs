//! Webpage documents, URL segments, and sibling ordering.

use chrono::{DateTime, Utc};
use pagewright_core::{AppError, AppResult, Entity, EntityId};
use serde::{Deserialize, Serialize};

/// Normalised URL segment of a webpage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UrlSegment(String);

impl UrlSegment {
    /// Creates a normalised, non-empty URL segment.
    ///
    /// Surrounding whitespace and slashes are removed, the value is
    /// lowercased and whitespace runs collapse into a single `-`.
    pub fn new(value: &str) -> AppResult<Self> {
        let normalised = Self::normalise(value);
        if normalised.is_empty() {
            return Err(AppError::Validation(
                "url segment must not be empty".to_owned(),
            ));
        }

        Ok(Self(normalised))
    }

    /// Normalises a raw segment without validating it.
    #[must_use]
    pub fn normalise(value: &str) -> String {
        value
            .trim()
            .trim_matches('/')
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase()
    }

    /// Returns the normalised segment.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Content page managed through the admin area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webpage {
    /// Repository-assigned identity.
    #[serde(default)]
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// URL segment the page is served under.
    pub url_segment: String,
    /// Parent page, or `None` for a root page.
    #[serde(default)]
    pub parent_id: Option<EntityId>,
    /// Position among siblings.
    #[serde(default)]
    pub display_order: i32,
    /// Publish instant. Unset means draft.
    #[serde(default)]
    pub published_on: Option<DateTime<Utc>>,
}

impl Webpage {
    /// Creates an unsaved draft page.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url_segment: impl Into<String>,
        parent_id: Option<EntityId>,
    ) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            name: name.into(),
            url_segment: url_segment.into(),
            parent_id,
            display_order: 0,
            published_on: None,
        }
    }

    /// Returns whether the page is live at `now`.
    #[must_use]
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.published_on
            .is_some_and(|published_on| published_on <= now)
    }

    /// Publishes the page at `now` unless it is already live.
    ///
    /// Returns `true` when the publish date changed.
    pub fn publish_at(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_published_at(now) {
            return false;
        }

        self.published_on = Some(now);
        true
    }

    /// Reverts the page to draft.
    pub fn unpublish(&mut self) {
        self.published_on = None;
    }
}

impl Entity for Webpage {
    const KIND: &'static str = "webpage";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

/// Sibling ordering entry shown by the sort screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortItem {
    /// Page identity.
    pub id: EntityId,
    /// Position among siblings.
    pub order: i32,
    /// Page name.
    pub name: String,
}

impl From<&Webpage> for SortItem {
    fn from(webpage: &Webpage) -> Self {
        Self {
            id: webpage.id,
            order: webpage.display_order,
            name: webpage.name.clone(),
        }
    }
}
