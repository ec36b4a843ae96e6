use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

/// Opaque client state with an optional expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct StateBlob {
    pub id: Uuid,
    pub value: Value,
    pub creation_date: DateTime<Utc>,
    pub expire_date: Option<DateTime<Utc>>,
    pub created_by: String,
}

impl StateBlob {
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_date.is_some_and(|at| at <= now)
    }
}
