//! Widget ordering within a page's layout area.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use pagewright_core::{AppError, AppResult, EntityId};
use pagewright_domain::{LayoutArea, Webpage, Widget};

use crate::Repository;

/// One widget row of the sort screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSortEntry {
    /// Widget identity.
    pub id: EntityId,
    /// Position within the area.
    pub order: i32,
    /// Editor-facing label.
    pub name: String,
}

/// Sort screen model for the widgets of one layout area on one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWidgetSortModel {
    /// Widgets in their current order.
    pub widgets: Vec<WidgetSortEntry>,
    /// Page being edited.
    pub webpage_id: EntityId,
    /// Layout area being edited.
    pub layout_area_id: EntityId,
}

impl PageWidgetSortModel {
    /// Builds the model from widgets already in display order.
    #[must_use]
    pub fn new(widgets: &[Widget], webpage: &Webpage, layout_area: &LayoutArea) -> Self {
        Self {
            widgets: widgets
                .iter()
                .enumerate()
                .map(|(index, widget)| WidgetSortEntry {
                    id: widget.id,
                    order: i32::try_from(index).unwrap_or(i32::MAX),
                    name: widget.display_label(),
                })
                .collect(),
            webpage_id: webpage.id,
            layout_area_id: layout_area.id,
        }
    }

    /// Returns the `(widget, order)` pairs to persist.
    #[must_use]
    pub fn widget_orders(&self) -> Vec<(EntityId, i32)> {
        self.widgets
            .iter()
            .map(|entry| (entry.id, entry.order))
            .collect()
    }
}

/// Application service backing the widget sort screen.
#[derive(Clone)]
pub struct WidgetSortService {
    widget_repository: Arc<dyn Repository<Widget>>,
    webpage_repository: Arc<dyn Repository<Webpage>>,
    layout_area_repository: Arc<dyn Repository<LayoutArea>>,
}

impl WidgetSortService {
    /// Creates a new widget sort service.
    #[must_use]
    pub fn new(
        widget_repository: Arc<dyn Repository<Widget>>,
        webpage_repository: Arc<dyn Repository<Webpage>>,
        layout_area_repository: Arc<dyn Repository<LayoutArea>>,
    ) -> Self {
        Self {
            widget_repository,
            webpage_repository,
            layout_area_repository,
        }
    }

    /// Loads the sort model for the widgets of `layout_area_id` on `webpage_id`.
    pub async fn sort_model(
        &self,
        webpage_id: EntityId,
        layout_area_id: EntityId,
    ) -> AppResult<PageWidgetSortModel> {
        let webpage = self
            .webpage_repository
            .get(webpage_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("webpage '{webpage_id}'")))?;
        let layout_area = self
            .layout_area_repository
            .get(layout_area_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("layout area '{layout_area_id}'")))?;

        let in_area = |widget: &Widget| {
            widget.webpage_id == webpage_id && widget.layout_area_id == layout_area_id
        };
        let mut widgets = self.widget_repository.query(&in_area).await?;
        widgets.sort_by_key(|widget| (widget.display_order, widget.id));

        Ok(PageWidgetSortModel::new(&widgets, &webpage, &layout_area))
    }

    /// Persists the widget orders of a submitted sort model.
    ///
    /// Widgets that do not belong to the model's page and area are rejected.
    pub async fn apply(&self, model: &PageWidgetSortModel) -> AppResult<()> {
        let mut widgets = Vec::with_capacity(model.widgets.len());
        for (widget_id, order) in model.widget_orders() {
            let mut widget = self
                .widget_repository
                .get(widget_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("widget '{widget_id}'")))?;
            if widget.webpage_id != model.webpage_id
                || widget.layout_area_id != model.layout_area_id
            {
                return Err(AppError::Validation(format!(
                    "widget '{widget_id}' is not placed in layout area '{}' of webpage '{}'",
                    model.layout_area_id, model.webpage_id
                )));
            }
            widget.display_order = order;
            widgets.push(widget);
        }

        for widget in widgets {
            self.widget_repository.update(widget).await?;
        }

        info!(
            webpage_id = %model.webpage_id,
            layout_area_id = %model.layout_area_id,
            widget_count = model.widgets.len(),
            "widget order saved"
        );
        Ok(())
    }
}
