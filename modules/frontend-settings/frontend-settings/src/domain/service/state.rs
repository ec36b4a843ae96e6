use std::sync::Arc;

use chrono::{DateTime, Datelike, Duration, Utc};
use serde_json::{Map, Value};
use settings_auth::Identity;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::config::StateConfig;
use crate::domain::error::DomainError;
use crate::domain::model::StateBlob;
use crate::domain::repos::StateRepository;

pub const STATE_NOT_FOUND: &str = "State not found";

/// Stored dates are compared as text, so they keep a four-digit year.
const MAX_EXPIRE_YEAR: i32 = 9999;

/// Short-lived UI state blobs addressed by a generated id.
pub struct StateService {
    repo: Arc<dyn StateRepository>,
    config: StateConfig,
}

impl StateService {
    #[must_use]
    pub fn new(repo: Arc<dyn StateRepository>, config: StateConfig) -> Self {
        Self { repo, config }
    }

    #[must_use]
    pub fn config(&self) -> &StateConfig {
        &self.config
    }

    /// `expires_in_minutes == 0` keeps the blob until deleted by hand.
    #[instrument(skip(self, owner, value))]
    pub async fn save(
        &self,
        owner: &Identity,
        value: Map<String, Value>,
        expires_in_minutes: u32,
    ) -> Result<Uuid, DomainError> {
        let limit = self.config.expires_in_minutes_limit;
        if limit > 0 && expires_in_minutes > limit {
            return Err(DomainError::validation(
                "expires_in_minutes",
                format!("Limit exceeded. Maximum allowable value {limit}"),
            ));
        }

        let now = Utc::now();
        let expire_date = match expires_in_minutes {
            0 => None,
            minutes => Some(
                now.checked_add_signed(Duration::minutes(i64::from(minutes)))
                    .filter(|at| at.year() <= MAX_EXPIRE_YEAR)
                    .ok_or_else(|| {
                        DomainError::validation(
                            "expires_in_minutes",
                            format!("Expiry must fall before the year {}", MAX_EXPIRE_YEAR + 1),
                        )
                    })?,
            ),
        };
        let blob = StateBlob {
            id: Uuid::new_v4(),
            value: Value::Object(value),
            creation_date: now,
            expire_date,
            created_by: owner.name.clone(),
        };
        self.repo.insert(&blob).await?;

        info!(id = %blob.id, "Saved state");
        Ok(blob.id)
    }

    /// Expired blobs read as missing even before the sweep removes them.
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Value, DomainError> {
        debug!("Loading state");
        match self.repo.find(id).await? {
            Some(blob) if !blob.is_expired_at(Utc::now()) => Ok(blob.value),
            _ => Err(DomainError::not_found(STATE_NOT_FOUND)),
        }
    }

    /// Deletes blobs that expired more than `drop_expired_minutes` before `now`.
    #[instrument(skip(self))]
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let cutoff = now - Duration::minutes(i64::from(self.config.drop_expired_minutes));
        let removed = self.repo.delete_expired_before(cutoff).await?;
        if removed > 0 {
            info!(removed, "Dropped expired states");
        } else {
            debug!("No expired states to drop");
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;
