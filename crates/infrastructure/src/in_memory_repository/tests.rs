use pagewright_application::Repository;
use pagewright_core::{AppError, EntityId};
use pagewright_domain::User;

use super::InMemoryRepository;

fn user(email: &str) -> User {
    User::new(email, "Test", "User")
}

async fn add(repository: &InMemoryRepository<User>, row: User) -> User {
    repository
        .add(row)
        .await
        .unwrap_or_else(|error| panic!("add should succeed: {error}"))
}

#[tokio::test]
async fn add_assigns_sequential_ids() {
    let repository = InMemoryRepository::new();

    let first = add(&repository, user("a@x.com")).await;
    let second = add(&repository, user("b@x.com")).await;

    assert_eq!(first.id, EntityId::new(1));
    assert_eq!(second.id, EntityId::new(2));
    assert_eq!(repository.len().await, 2);
}

#[tokio::test]
async fn add_keeps_preassigned_id_and_continues_after_it() {
    let repository = InMemoryRepository::new();
    let mut preassigned = user("a@x.com");
    preassigned.id = EntityId::new(10);

    add(&repository, preassigned.clone()).await;
    let next = add(&repository, user("b@x.com")).await;

    assert_eq!(next.id, EntityId::new(11));
    assert!(matches!(
        repository.add(preassigned).await,
        Err(AppError::Conflict(_))
    ));
}

#[tokio::test]
async fn update_of_missing_entity_is_not_found() {
    let repository = InMemoryRepository::<User>::new();
    let mut missing = user("a@x.com");
    missing.id = EntityId::new(3);

    assert!(matches!(
        repository.update(missing).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn update_replaces_stored_entity() {
    let repository = InMemoryRepository::new();
    let mut stored = add(&repository, user("a@x.com")).await;
    stored.first_name = "Changed".to_owned();

    assert!(repository.update(stored.clone()).await.is_ok());
    assert!(matches!(repository.get(stored.id).await, Ok(Some(found)) if found == stored));
}

#[tokio::test]
async fn query_returns_matches_in_id_order() {
    let repository = InMemoryRepository::new();
    add(&repository, user("a@x.com")).await;
    add(&repository, user("b@y.com")).await;
    add(&repository, user("c@x.com")).await;

    let in_x = |row: &User| row.email.ends_with("@x.com");
    let emails: Vec<String> = repository
        .query(&in_x)
        .await
        .unwrap_or_else(|error| panic!("query should succeed: {error}"))
        .into_iter()
        .map(|row| row.email)
        .collect();

    assert_eq!(emails, vec!["a@x.com".to_owned(), "c@x.com".to_owned()]);
}

#[tokio::test]
async fn delete_and_delete_all_remove_entities() {
    let repository = InMemoryRepository::new();
    let first = add(&repository, user("a@x.com")).await;
    add(&repository, user("b@x.com")).await;

    assert!(repository.delete(first.id).await.is_ok());
    assert!(matches!(repository.get(first.id).await, Ok(None)));
    assert!(repository.delete(first.id).await.is_ok());

    assert!(repository.delete_all().await.is_ok());
    assert!(repository.is_empty().await);

    let after_clear = add(&repository, user("c@x.com")).await;
    assert_eq!(after_clear.id, EntityId::new(3));
}

#[tokio::test]
async fn add_without_id_after_the_last_id_conflicts() {
    let repository = InMemoryRepository::new();
    let mut last = user("last@x.com");
    last.id = EntityId::new(i64::MAX);
    add(&repository, last).await;

    assert!(matches!(
        repository.add(user("next@x.com")).await,
        Err(AppError::Conflict(_))
    ));
    assert_eq!(repository.len().await, 1);
    assert!(matches!(
        repository.get(EntityId::new(i64::MAX)).await,
        Ok(Some(found)) if found.email == "last@x.com"
    ));
}

#[tokio::test]
async fn add_without_id_continues_after_highest_preassigned_id() {
    let repository = InMemoryRepository::new();
    let mut high = user("high@x.com");
    high.id = EntityId::new(7);
    add(&repository, high).await;
    let mut low = user("low@x.com");
    low.id = EntityId::new(2);
    add(&repository, low).await;

    let next = add(&repository, user("next@x.com")).await;

    assert_eq!(next.id, EntityId::new(8));
}
