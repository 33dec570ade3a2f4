use std::sync::Arc;

use pagewright_application::{ExternalUserSource, Repository, UserLookup};
use pagewright_core::{AppError, EntityId, RequestIdentity};
use pagewright_domain::{User, Webpage};
use uuid::Uuid;

use crate::{DirectoryUserSource, InMemoryRepository, SystemClock};

use super::{SeedData, seed_repository};

const RESET_TOKEN: &str = "6f1c2a9e-4b7d-4e3a-9c51-2d8f0b7a4e11";

fn parse(json: &str) -> SeedData {
    SeedData::parse(json).unwrap_or_else(|error| panic!("seed should parse: {error}"))
}

#[tokio::test]
async fn seed_data_fills_repositories() {
    let seed = parse(
        r#"{
            "users": [
                {"email": "editor@example.com", "first_name": "Ed", "last_name": "Itor"},
                {"email": "admin@example.com"}
            ],
            "external_users": [{"email": "guest@partner.org"}]
        }"#,
    );

    assert_eq!(seed.external_users.len(), 1);
    assert!(seed.webpages.is_empty());

    let repository = InMemoryRepository::<User>::new();
    let seeded = seed_repository(&repository, seed.users).await;

    assert!(matches!(seeded, Ok(2)));
    assert!(matches!(
        repository.get(EntityId::new(2)).await,
        Ok(Some(found)) if found.email == "admin@example.com"
    ));
}

#[tokio::test]
async fn seeded_ids_are_kept_and_duplicates_conflict() {
    let seed = parse(
        r#"{
            "webpages": [
                {"id": 5, "name": "About", "url_segment": "about"},
                {"name": "Contact", "url_segment": "contact"},
                {"id": 5, "name": "Again", "url_segment": "again"}
            ]
        }"#,
    );

    let repository = InMemoryRepository::<Webpage>::new();
    let seeded = seed_repository(&repository, seed.webpages).await;

    assert!(matches!(seeded, Err(AppError::Conflict(_))));
    assert!(matches!(
        repository.get(EntityId::new(6)).await,
        Ok(Some(found)) if found.url_segment == "contact"
    ));
    assert_eq!(repository.len().await, 2);
}

#[tokio::test]
async fn seeded_users_resolve_through_user_lookup() {
    let seed = parse(&format!(
        r#"{{
            "users": [
                {{"email": "a@x.com"}},
                {{"email": "b@x.com"}},
                {{
                    "email": "reset@x.com",
                    "reset_password_guid": "{RESET_TOKEN}",
                    "reset_password_expiry": "2999-01-01T00:00:00Z"
                }}
            ],
            "external_users": [{{"email": "remote@partner.org"}}]
        }}"#
    ));

    let repository = Arc::new(InMemoryRepository::<User>::new());
    seed_repository(repository.as_ref(), seed.users)
        .await
        .unwrap_or_else(|error| panic!("seeding should succeed: {error}"));

    let directory = Arc::new(DirectoryUserSource::new("directory", seed.external_users));
    let lookup = UserLookup::new(
        repository,
        vec![directory as Arc<dyn ExternalUserSource>],
        Arc::new(SystemClock::new()),
    );
    let token = Uuid::parse_str(RESET_TOKEN)
        .unwrap_or_else(|error| panic!("token should parse: {error}"));

    assert!(matches!(
        lookup.get_user_by_email("B@X.COM").await,
        Ok(Some(found)) if found.id == EntityId::new(2)
    ));
    assert!(matches!(
        lookup.get_user_by_reset_guid(token).await,
        Ok(Some(found)) if found.email == "reset@x.com"
    ));
    assert!(matches!(
        lookup
            .get_current_user(&RequestIdentity::signed_in("remote@partner.org"))
            .await,
        Ok(Some(found)) if !found.id.is_assigned()
    ));
    assert!(matches!(
        lookup.get_user_by_email("nobody@x.com").await,
        Ok(None)
    ));
}

#[test]
fn malformed_seed_is_a_validation_error() {
    assert!(matches!(
        SeedData::parse(r#"{"users": "nope"}"#),
        Err(AppError::Validation(_))
    ));
}
