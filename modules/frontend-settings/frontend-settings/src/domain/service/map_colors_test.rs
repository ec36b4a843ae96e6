#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::{Map, json};

use super::*;
use crate::domain::defaults::DEFAULT_ALREADY_EXISTS;
use crate::infra::storage::OrmMapColorsRepository;
use crate::test_support::{inmem_db, user};

type Service = MapColorsService<OrmMapColorsRepository>;

async fn setup() -> Service {
    let db = inmem_db().await;
    MapColorsService::new(db, Arc::new(OrmMapColorsRepository))
}

fn range() -> Map<String, Value> {
    json!({"breaks": [0, 10, 20]}).as_object().cloned().unwrap()
}

fn new_color(attribute: &str, public: bool, is_default: bool) -> NewMapColor {
    NewMapColor {
        name: format!("{attribute} colors"),
        layer: "roads".to_owned(),
        attribute: attribute.to_owned(),
        range: range(),
        public,
        is_default,
    }
}

fn scope(attribute: &str) -> MapColorScope {
    MapColorScope {
        layer: "roads".to_owned(),
        attribute: attribute.to_owned(),
    }
}

#[tokio::test]
async fn default_lookup_falls_back_to_public() {
    let svc = setup().await;
    let public = svc
        .create(&user("carol"), new_color("speed", true, true), false)
        .await
        .unwrap();

    let found = svc.default_for(&user("alice"), &scope("speed")).await.unwrap();
    assert_eq!(found.id, public);

    let err = svc
        .default_for(&user("alice"), &scope("width"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { ref message } if message == DEFAULT_NOT_SET));
}

#[tokio::test]
async fn private_default_wins_for_its_owner() {
    let svc = setup().await;
    svc.create(&user("carol"), new_color("speed", true, true), false)
        .await
        .unwrap();
    let mine = svc
        .create(&user("alice"), new_color("speed", false, true), false)
        .await
        .unwrap();

    let found = svc.default_for(&user("alice"), &scope("speed")).await.unwrap();
    assert_eq!(found.id, mine);
}

#[tokio::test]
async fn attributes_with_default_are_listed_once() {
    let svc = setup().await;
    svc.create(&user("carol"), new_color("speed", true, true), false)
        .await
        .unwrap();
    svc.create(&user("alice"), new_color("speed", false, true), false)
        .await
        .unwrap();
    svc.create(&user("alice"), new_color("width", true, false), false)
        .await
        .unwrap();

    let attrs = svc
        .attributes_with_default(&user("alice"), "roads")
        .await
        .unwrap();
    assert_eq!(attrs, ["speed"]);
}

#[tokio::test]
async fn duplicate_public_default_conflicts() {
    let svc = setup().await;
    svc.create(&user("carol"), new_color("speed", true, true), false)
        .await
        .unwrap();
    let err = svc
        .create(&user("alice"), new_color("speed", true, true), false)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict { ref message } if message == DEFAULT_ALREADY_EXISTS));
}

#[tokio::test]
async fn update_replaces_the_body() {
    let svc = setup().await;
    let alice = user("alice");
    let id = svc
        .create(&alice, new_color("speed", true, false), false)
        .await
        .unwrap();

    let update = MapColorUpdate {
        name: "fast lanes".to_owned(),
        range: json!({"breaks": [50]}).as_object().cloned().unwrap(),
        public: false,
        is_default: true,
    };
    svc.update(&alice, id, update, false).await.unwrap();

    let record = svc.get(&alice, id).await.unwrap();
    assert_eq!(record.name, "fast lanes");
    assert_eq!(record.range, json!({"breaks": [50]}));
    assert!(!record.public);
    assert!(record.is_default);
    assert!(svc.get(&user("bob"), id).await.is_err());
}

#[tokio::test]
async fn only_the_owner_may_delete() {
    let svc = setup().await;
    let id = svc
        .create(&user("alice"), new_color("speed", true, false), false)
        .await
        .unwrap();

    let err = svc.delete(&user("bob"), id, true).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    svc.delete(&user("alice"), id, false).await.unwrap();
    assert!(svc.list(&user("alice"), &scope("speed")).await.unwrap().is_empty());
}
