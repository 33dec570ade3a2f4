//! Pagewright admin console composition root.

#![forbid(unsafe_code)]

mod command;
mod console_config;

use std::env;
use std::sync::Arc;

use pagewright_application::{
    Clock, ExternalUserSource, PasswordResetService, UserLookup, WebpageAdminService,
    WidgetSortService,
};
use pagewright_core::{AppError, AppResult};
use pagewright_domain::{LayoutArea, User, Webpage, Widget};
use pagewright_infrastructure::{
    DirectoryUserSource, InMemoryRepository, SeedData, SystemClock, seed_repository,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::command::Command;
use crate::console_config::{ConsoleConfig, init_tracing};

struct Services {
    user_lookup: UserLookup,
    password_reset: PasswordResetService,
    webpage_admin: WebpageAdminService,
    widget_sort: WidgetSortService,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let command = Command::parse(env::args().skip(1))?;
    let config = ConsoleConfig::load()?;
    let services = build_services(&config).await?;

    let output = run(command, &services, &config).await?;
    let rendered = serde_json::to_string_pretty(&output)
        .map_err(|error| AppError::Internal(format!("failed to render output: {error}")))?;
    println!("{rendered}");

    Ok(())
}

async fn build_services(config: &ConsoleConfig) -> AppResult<Services> {
    let seed = SeedData::load(&config.seed_file).await?;

    let users = Arc::new(InMemoryRepository::<User>::new());
    let webpages = Arc::new(InMemoryRepository::<Webpage>::new());
    let widgets = Arc::new(InMemoryRepository::<Widget>::new());
    let layout_areas = Arc::new(InMemoryRepository::<LayoutArea>::new());

    seed_repository(users.as_ref(), seed.users).await?;
    seed_repository(webpages.as_ref(), seed.webpages).await?;
    seed_repository(layout_areas.as_ref(), seed.layout_areas).await?;
    seed_repository(widgets.as_ref(), seed.widgets).await?;

    let mut external_sources: Vec<Arc<dyn ExternalUserSource>> = Vec::new();
    if !seed.external_users.is_empty() {
        external_sources.push(Arc::new(DirectoryUserSource::new(
            "seed-directory",
            seed.external_users,
        )));
    }

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let user_lookup = UserLookup::new(users, external_sources, clock.clone());

    info!(
        seed_file = %config.seed_file.display(),
        "pagewright-console ready"
    );

    Ok(Services {
        password_reset: PasswordResetService::new(user_lookup.clone(), config.reset_policy),
        user_lookup,
        webpage_admin: WebpageAdminService::new(webpages.clone(), clock),
        widget_sort: WidgetSortService::new(widgets, webpages, layout_areas),
    })
}

async fn run(command: Command, services: &Services, config: &ConsoleConfig) -> AppResult<Value> {
    match command {
        Command::UserByEmail(email) => {
            to_json(&services.user_lookup.get_user_by_email(&email).await?)
        }
        Command::UserByResetToken(token) => {
            to_json(&services.user_lookup.get_user_by_reset_guid(token).await?)
        }
        Command::CurrentUser => to_json(
            &services
                .user_lookup
                .get_current_user(&config.request_identity)
                .await?,
        ),
        Command::RequestReset(email) => {
            to_json(&services.password_reset.request_reset(&email).await?)
        }
        Command::CompleteReset(token) => {
            to_json(&services.password_reset.complete_reset(token).await?)
        }
        Command::ValidateUrl {
            url_segment,
            webpage_id,
        } => to_json(
            &services
                .webpage_admin
                .url_is_valid_for_webpage(&url_segment, webpage_id)
                .await?,
        ),
        Command::Publish(webpage_id) => {
            to_json(&services.webpage_admin.publish_now(webpage_id).await?)
        }
        Command::Unpublish(webpage_id) => {
            to_json(&services.webpage_admin.unpublish(webpage_id).await?)
        }
        Command::SortPages(parent_id) => {
            to_json(&services.webpage_admin.get_sort_items(parent_id).await?)
        }
        Command::SortWidgets {
            webpage_id,
            layout_area_id,
        } => to_json(
            &services
                .widget_sort
                .sort_model(webpage_id, layout_area_id)
                .await?,
        ),
    }
}

fn to_json<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|error| AppError::Internal(format!("failed to serialize output: {error}")))
}
