use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::model::StateBlob;

#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn insert(&self, blob: &StateBlob) -> anyhow::Result<()>;

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<StateBlob>>;

    /// Deletes rows with `expire_date <= cutoff`; returns how many went.
    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> anyhow::Result<u64>;
}
