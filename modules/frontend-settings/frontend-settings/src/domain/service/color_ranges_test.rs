#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde_json::json;

use super::*;
use crate::domain::defaults::{DEFAULT_ALREADY_EXISTS, DEFAULT_REMOVAL_FORBIDDEN, DEFAULT_STILL_IN_USE};
use crate::domain::model::{Direction, ValueType};
use crate::infra::storage::OrmColorRangesRepository;
use crate::test_support::{inmem_db, user};

type Service = ColorRangesService<OrmColorRangesRepository>;

async fn setup() -> (DatabaseConnection, Service) {
    let db = inmem_db().await;
    let svc = ColorRangesService::new(db.clone(), Arc::new(OrmColorRangesRepository), 1000);
    (db, svc)
}

fn range(tprm_id: &str, name: &str, public: bool, is_default: bool) -> NewColorRange {
    NewColorRange {
        tmo_id: "10".to_owned(),
        tprm_id: tprm_id.to_owned(),
        val_type: "float".to_owned(),
        name: name.to_owned(),
        value_type: ValueType::General,
        with_indeterminate: None,
        with_cleared: None,
        ranges: json!({"colors": [{"name": "red"}]})
            .as_object()
            .cloned()
            .unwrap(),
        public,
        is_default,
        direction: Direction::Asc,
    }
}

async fn load(db: &DatabaseConnection, id: i32, subject: &str) -> ColorRange {
    OrmColorRangesRepository
        .find_visible(db, id, subject)
        .await
        .unwrap()
        .expect("record visible")
}

fn conflict_message(err: DomainError) -> String {
    match err {
        DomainError::Conflict { message } => message,
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn second_public_default_requires_forced() {
    let (_db, svc) = setup().await;
    let alice = user("alice");
    svc.create(&alice, range("1", "first", true, true), false)
        .await
        .unwrap();

    let err = svc
        .create(&alice, range("1", "second", true, true), false)
        .await
        .unwrap_err();
    assert_eq!(conflict_message(err), DEFAULT_ALREADY_EXISTS);
}

#[tokio::test]
async fn forced_create_demotes_previous_default() {
    let (db, svc) = setup().await;
    let alice = user("alice");
    let first = svc
        .create(&alice, range("1", "first", true, true), false)
        .await
        .unwrap();
    let second = svc
        .create(&user("bob"), range("1", "second", true, true), true)
        .await
        .unwrap();

    assert!(!load(&db, first, "alice").await.is_default);
    assert!(load(&db, second, "alice").await.is_default);
}

#[tokio::test]
async fn private_defaults_of_different_owners_coexist() {
    let (db, svc) = setup().await;
    let a = svc
        .create(&user("alice"), range("1", "mine", false, true), false)
        .await
        .unwrap();
    let b = svc
        .create(&user("bob"), range("1", "mine too", false, true), false)
        .await
        .unwrap();
    let public = svc
        .create(&user("carol"), range("1", "shared", true, true), false)
        .await
        .unwrap();

    assert!(load(&db, a, "alice").await.is_default);
    assert!(load(&db, b, "bob").await.is_default);
    assert!(load(&db, public, "carol").await.is_default);
}

#[tokio::test]
async fn private_records_are_hidden_from_others() {
    let (_db, svc) = setup().await;
    let id = svc
        .create(&user("alice"), range("1", "mine", false, false), false)
        .await
        .unwrap();

    let err = svc
        .delete(&user("bob"), id, false)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn renaming_a_default_keeps_it_default() {
    let (db, svc) = setup().await;
    let alice = user("alice");
    let id = svc
        .create(&alice, range("1", "first", true, true), false)
        .await
        .unwrap();

    let patch = ColorRangePatch {
        name: Some("renamed".to_owned()),
        ..ColorRangePatch::default()
    };
    svc.update(&alice, id, patch, false).await.unwrap();

    let record = load(&db, id, "alice").await;
    assert_eq!(record.name, "renamed");
    assert!(record.is_default);
    assert_eq!(record.direction, Direction::Asc);
}

#[tokio::test]
async fn clearing_the_default_flag_needs_forced() {
    let (db, svc) = setup().await;
    let alice = user("alice");
    let id = svc
        .create(&alice, range("1", "first", true, true), false)
        .await
        .unwrap();
    let demote = ColorRangePatch {
        is_default: Some(false),
        ..ColorRangePatch::default()
    };

    let err = svc
        .update(&alice, id, demote.clone(), false)
        .await
        .unwrap_err();
    assert_eq!(conflict_message(err), DEFAULT_STILL_IN_USE);

    svc.update(&alice, id, demote, true).await.unwrap();
    assert!(!load(&db, id, "alice").await.is_default);
}

#[tokio::test]
async fn promoting_into_a_taken_slot_conflicts() {
    let (_db, svc) = setup().await;
    let alice = user("alice");
    svc.create(&alice, range("1", "first", true, true), false)
        .await
        .unwrap();
    let other = svc
        .create(&alice, range("1", "second", true, false), false)
        .await
        .unwrap();

    let promote = ColorRangePatch {
        is_default: Some(true),
        ..ColorRangePatch::default()
    };
    let err = svc.update(&alice, other, promote, false).await.unwrap_err();
    assert_eq!(conflict_message(err), DEFAULT_ALREADY_EXISTS);
}

#[tokio::test]
async fn public_default_removal_is_guarded() {
    let (_db, svc) = setup().await;
    let alice = user("alice");
    let id = svc
        .create(&alice, range("1", "first", true, true), false)
        .await
        .unwrap();

    let err = svc.delete(&alice, id, false).await.unwrap_err();
    assert_eq!(conflict_message(err), DEFAULT_REMOVAL_FORBIDDEN);

    svc.delete(&alice, id, true).await.unwrap();
    let err = svc.delete(&alice, id, true).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn private_default_can_be_removed_without_forced() {
    let (_db, svc) = setup().await;
    let alice = user("alice");
    let id = svc
        .create(&alice, range("1", "mine", false, true), false)
        .await
        .unwrap();

    svc.delete(&alice, id, false).await.unwrap();
}

#[tokio::test]
async fn defaults_prefer_the_callers_private_record() {
    let (_db, svc) = setup().await;
    let public = svc
        .create(&user("carol"), range("1", "shared", true, true), false)
        .await
        .unwrap();
    let private = svc
        .create(&user("alice"), range("1", "mine", false, true), false)
        .await
        .unwrap();
    let query = DefaultsQuery {
        tmo_id: Some("10".to_owned()),
        ..DefaultsQuery::default()
    };

    let for_alice = svc.defaults(&user("alice"), &query).await.unwrap();
    assert_eq!(for_alice.iter().map(|r| r.id).collect::<Vec<_>>(), [private]);

    let for_bob = svc.defaults(&user("bob"), &query).await.unwrap();
    assert_eq!(for_bob.iter().map(|r| r.id).collect::<Vec<_>>(), [public]);
}

#[tokio::test]
async fn defaults_need_a_search_parameter() {
    let (_db, svc) = setup().await;
    let err = svc
        .defaults(&user("alice"), &DefaultsQuery::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref message, .. } if message == MISSING_SEARCH_PARAMETER));
}

#[tokio::test]
async fn filter_rejects_out_of_range_limit() {
    let (_db, svc) = setup().await;
    let filter = ColorRangeFilter {
        limit: 1001,
        ..ColorRangeFilter::default()
    };
    let err = svc.filter(&user("alice"), &filter).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "limit"));
}

#[tokio::test]
async fn filter_returns_visible_records_only() {
    let (_db, svc) = setup().await;
    let shared = svc
        .create(&user("alice"), range("1", "shared", true, false), false)
        .await
        .unwrap();
    svc.create(&user("alice"), range("2", "mine", false, false), false)
        .await
        .unwrap();

    let filter = ColorRangeFilter {
        tmo_ids: vec!["10".to_owned()],
        limit: 10,
        ..ColorRangeFilter::default()
    };
    let found = svc.filter(&user("bob"), &filter).await.unwrap();
    assert_eq!(found.iter().map(|r| r.id).collect::<Vec<_>>(), [shared]);
}

#[tokio::test]
async fn slot_index_rejects_a_second_default_written_around_the_enforcer() {
    let (db, _svc) = setup().await;
    let alice = user("alice");
    let repo = OrmColorRangesRepository;

    let first = range("1", "first", true, true).into_record(&alice);
    repo.insert(&db, &first).await.unwrap();

    let second = range("1", "second", true, true).into_record(&alice);
    let err = repo.insert(&db, &second).await.unwrap_err();
    assert_eq!(conflict_message(err), crate::infra::storage::db::DUPLICATE_KEY);

    let private = range("1", "mine", false, true).into_record(&alice);
    repo.insert(&db, &private).await.unwrap();
}
