//! Webpage administration: URL validation, CRUD, publishing and sibling ordering.

use std::sync::Arc;

use tracing::info;

use pagewright_core::{AppError, AppResult, EntityId};
use pagewright_domain::{SortItem, UrlSegment, Webpage};

use crate::{Clock, Repository};

/// Application service for the webpage admin area.
#[derive(Clone)]
pub struct WebpageAdminService {
    webpage_repository: Arc<dyn Repository<Webpage>>,
    clock: Arc<dyn Clock>,
}

impl WebpageAdminService {
    /// Creates a new webpage admin service.
    #[must_use]
    pub fn new(webpage_repository: Arc<dyn Repository<Webpage>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            webpage_repository,
            clock,
        }
    }

    /// Returns whether `url_segment` may be used by the page `webpage_id`.
    ///
    /// A segment is rejected when it normalises to nothing or when another
    /// page already uses it. Pass `None` for a page that is not stored yet.
    pub async fn url_is_valid_for_webpage(
        &self,
        url_segment: &str,
        webpage_id: Option<EntityId>,
    ) -> AppResult<bool> {
        let normalised = UrlSegment::normalise(url_segment);
        if normalised.is_empty() {
            return Ok(false);
        }

        Ok(self
            .find_segment_owner(&normalised, webpage_id)
            .await?
            .is_none())
    }

    /// Adds a page after its existing siblings.
    pub async fn add(&self, mut webpage: Webpage) -> AppResult<Webpage> {
        let segment = self.claim_segment(&webpage.url_segment, None).await?;
        webpage.url_segment = segment.as_str().to_owned();

        let parent_id = webpage.parent_id;
        let is_sibling = |page: &Webpage| page.parent_id == parent_id;
        webpage.display_order = self
            .webpage_repository
            .query(&is_sibling)
            .await?
            .iter()
            .map(|page| page.display_order)
            .max()
            .map_or(0, |order| order.saturating_add(1));

        let webpage = self.webpage_repository.add(webpage).await?;
        info!(
            webpage_id = %webpage.id,
            url_segment = %webpage.url_segment,
            "webpage added"
        );
        Ok(webpage)
    }

    /// Saves changes to an existing page.
    pub async fn update(&self, mut webpage: Webpage) -> AppResult<()> {
        let segment = self
            .claim_segment(&webpage.url_segment, Some(webpage.id))
            .await?;
        webpage.url_segment = segment.as_str().to_owned();

        self.webpage_repository.update(webpage).await
    }

    /// Deletes a page.
    pub async fn delete(&self, webpage_id: EntityId) -> AppResult<()> {
        let webpage = self.require(webpage_id).await?;
        self.webpage_repository.delete(webpage.id).await?;

        info!(webpage_id = %webpage.id, "webpage deleted");
        Ok(())
    }

    /// Publishes a page immediately. An already live page keeps its publish date.
    pub async fn publish_now(&self, webpage_id: EntityId) -> AppResult<Webpage> {
        let mut webpage = self.require(webpage_id).await?;
        if webpage.publish_at(self.clock.now()) {
            self.webpage_repository.update(webpage.clone()).await?;
            info!(webpage_id = %webpage.id, "webpage published");
        }

        Ok(webpage)
    }

    /// Reverts a page to draft.
    pub async fn unpublish(&self, webpage_id: EntityId) -> AppResult<Webpage> {
        let mut webpage = self.require(webpage_id).await?;
        webpage.unpublish();
        self.webpage_repository.update(webpage.clone()).await?;

        info!(webpage_id = %webpage.id, "webpage unpublished");
        Ok(webpage)
    }

    /// Lists the children of `parent_id` (root pages for `None`) in display order.
    pub async fn get_sort_items(&self, parent_id: Option<EntityId>) -> AppResult<Vec<SortItem>> {
        let is_child = |page: &Webpage| page.parent_id == parent_id;
        let mut children = self.webpage_repository.query(&is_child).await?;
        children.sort_by_key(|page| (page.display_order, page.id));

        Ok(children.iter().map(SortItem::from).collect())
    }

    /// Applies the given display orders.
    ///
    /// Every listed page must exist; nothing is written otherwise.
    pub async fn set_orders(&self, items: &[SortItem]) -> AppResult<()> {
        let mut webpages = Vec::with_capacity(items.len());
        for item in items {
            let mut webpage = self.require(item.id).await?;
            webpage.display_order = item.order;
            webpages.push(webpage);
        }

        for webpage in webpages {
            self.webpage_repository.update(webpage).await?;
        }

        Ok(())
    }

    async fn require(&self, webpage_id: EntityId) -> AppResult<Webpage> {
        self.webpage_repository
            .get(webpage_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("webpage '{webpage_id}'")))
    }

    async fn claim_segment(
        &self,
        url_segment: &str,
        webpage_id: Option<EntityId>,
    ) -> AppResult<UrlSegment> {
        let segment = UrlSegment::new(url_segment)?;
        if let Some(owner) = self
            .find_segment_owner(segment.as_str(), webpage_id)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "url segment '{}' is already used by webpage '{}'",
                segment.as_str(),
                owner.id
            )));
        }

        Ok(segment)
    }

    async fn find_segment_owner(
        &self,
        normalised: &str,
        webpage_id: Option<EntityId>,
    ) -> AppResult<Option<Webpage>> {
        let uses_segment = |page: &Webpage| {
            Some(page.id) != webpage_id && UrlSegment::normalise(&page.url_segment) == normalised
        };
        self.webpage_repository.find_first(&uses_segment).await
    }
}
