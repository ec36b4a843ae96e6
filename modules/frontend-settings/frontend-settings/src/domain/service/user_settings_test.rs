#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;

use super::*;
use crate::infra::storage::SeaOrmUserSettingsRepository;
use crate::test_support::{inmem_db, user};

async fn setup() -> UserSettingsService {
    let db = inmem_db().await;
    UserSettingsService::new(Arc::new(SeaOrmUserSettingsRepository::new(db)))
}

#[tokio::test]
async fn settings_are_scoped_to_the_caller() {
    let svc = setup().await;
    let alice = user("alice");
    svc.create(&alice, "inventory", json!({"theme": "dark"}))
        .await
        .unwrap();
    svc.create(&alice, "map", json!({})).await.unwrap();

    assert_eq!(svc.keys(&alice).await.unwrap(), ["inventory", "map"]);
    assert!(svc.keys(&user("bob")).await.unwrap().is_empty());

    let err = svc.get(&user("bob"), "inventory").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { ref message } if message == USER_SETTINGS_NOT_FOUND));
}

#[tokio::test]
async fn second_create_for_same_key_conflicts() {
    let svc = setup().await;
    let alice = user("alice");
    svc.create(&alice, "inventory", json!({})).await.unwrap();

    let err = svc
        .create(&alice, "inventory", json!({"x": 1}))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { ref message } if message == USER_SETTINGS_EXIST));

    svc.create(&user("bob"), "inventory", json!({})).await.unwrap();
}

#[tokio::test]
async fn update_replaces_and_delete_removes() {
    let svc = setup().await;
    let alice = user("alice");
    svc.create(&alice, "inventory", json!({"theme": "dark"}))
        .await
        .unwrap();

    svc.update(&alice, "inventory", json!({"theme": "light"}))
        .await
        .unwrap();
    assert_eq!(
        svc.get(&alice, "inventory").await.unwrap().settings,
        json!({"theme": "light"})
    );

    svc.delete(&alice, "inventory").await.unwrap();
    assert!(matches!(
        svc.delete(&alice, "inventory").await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        svc.update(&alice, "inventory", json!({})).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn empty_key_is_rejected() {
    let svc = setup().await;
    let err = svc.create(&user("alice"), "", json!({})).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "key"));
}
