#![allow(clippy::unwrap_used, clippy::expect_used)]

use serde_json::json;

use super::*;
use crate::infra::storage::SeaOrmStateRepository;
use crate::test_support::{inmem_db, user};

async fn setup(config: StateConfig) -> (Arc<SeaOrmStateRepository>, StateService) {
    let repo = Arc::new(SeaOrmStateRepository::new(inmem_db().await));
    let svc = StateService::new(repo.clone(), config);
    (repo, svc)
}

fn value() -> Map<String, Value> {
    json!({"filters": {"status": "active"}}).as_object().cloned().unwrap()
}

fn blob(expire_date: Option<DateTime<Utc>>) -> StateBlob {
    StateBlob {
        id: Uuid::new_v4(),
        value: json!({"k": 1}),
        creation_date: Utc::now() - Duration::days(3),
        expire_date,
        created_by: "User alice".to_owned(),
    }
}

#[tokio::test]
async fn saved_state_reads_back() {
    let (_repo, svc) = setup(StateConfig::default()).await;
    let id = svc.save(&user("alice"), value(), 30).await.unwrap();
    assert_eq!(svc.get(id).await.unwrap(), json!({"filters": {"status": "active"}}));
}

#[tokio::test]
async fn expiry_above_limit_is_rejected() {
    let config = StateConfig {
        expires_in_minutes_limit: 60,
        ..StateConfig::default()
    };
    let (_repo, svc) = setup(config).await;

    let err = svc.save(&user("alice"), value(), 61).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "expires_in_minutes"));

    svc.save(&user("alice"), value(), 60).await.unwrap();
}

#[tokio::test]
async fn zero_limit_disables_the_check() {
    let config = StateConfig {
        expires_in_minutes_limit: 0,
        ..StateConfig::default()
    };
    let (_repo, svc) = setup(config).await;
    let century = 100 * 365 * 24 * 60;
    let id = svc.save(&user("alice"), value(), century).await.unwrap();
    assert!(svc.get(id).await.is_ok());
}

#[tokio::test]
async fn expiry_past_year_9999_is_rejected() {
    let config = StateConfig {
        expires_in_minutes_limit: 0,
        ..StateConfig::default()
    };
    let (_repo, svc) = setup(config).await;

    let err = svc.save(&user("alice"), value(), u32::MAX).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation { ref field, ref message }
            if field == "expires_in_minutes" && message == "Expiry must fall before the year 10000"
    ));
}

#[tokio::test]
async fn expired_state_reads_as_missing() {
    let (repo, svc) = setup(StateConfig::default()).await;
    let expired = blob(Some(Utc::now() - Duration::minutes(1)));
    repo.insert(&expired).await.unwrap();

    let err = svc.get(expired.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { ref message } if message == STATE_NOT_FOUND));
    assert!(matches!(svc.get(Uuid::new_v4()).await, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn sweep_drops_only_rows_past_the_grace_period() {
    let config = StateConfig {
        drop_expired_minutes: 60,
        ..StateConfig::default()
    };
    let (repo, svc) = setup(config).await;
    let now = Utc::now();
    let stale = blob(Some(now - Duration::hours(2)));
    let recent = blob(Some(now - Duration::minutes(10)));
    let forever = blob(None);
    for b in [&stale, &recent, &forever] {
        repo.insert(b).await.unwrap();
    }

    assert_eq!(svc.sweep(now).await.unwrap(), 1);
    assert!(repo.find(stale.id).await.unwrap().is_none());
    assert!(repo.find(recent.id).await.unwrap().is_some());
    assert!(repo.find(forever.id).await.unwrap().is_some());
    assert_eq!(svc.sweep(now).await.unwrap(), 0);
}
