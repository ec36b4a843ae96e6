use std::sync::Arc;

use serde_json::Value;
use settings_auth::Identity;
use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::{UserSettings, require_non_empty};
use crate::domain::repos::UserSettingsRepository;

pub const USER_SETTINGS_NOT_FOUND: &str = "Settings with given id not exist!";
pub const USER_SETTINGS_EXIST: &str = "Settings for this user and module already exist!";

/// Per-user documents keyed by the caller's subject and a free-form key.
pub struct UserSettingsService {
    repo: Arc<dyn UserSettingsRepository>,
}

impl UserSettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn UserSettingsRepository>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, caller))]
    pub async fn keys(&self, caller: &Identity) -> Result<Vec<String>, DomainError> {
        debug!("Listing user settings keys");
        Ok(self.repo.list_keys(&caller.subject).await?)
    }

    #[instrument(skip(self, caller))]
    pub async fn get(&self, caller: &Identity, key: &str) -> Result<UserSettings, DomainError> {
        debug!("Getting user settings");
        self.repo
            .find(&caller.subject, key)
            .await?
            .ok_or_else(|| DomainError::not_found(USER_SETTINGS_NOT_FOUND))
    }

    #[instrument(skip(self, caller, settings))]
    pub async fn create(
        &self,
        caller: &Identity,
        key: &str,
        settings: Value,
    ) -> Result<UserSettings, DomainError> {
        info!("Creating user settings");
        require_non_empty("key", key)?;
        if self.repo.find(&caller.subject, key).await?.is_some() {
            return Err(DomainError::conflict(USER_SETTINGS_EXIST));
        }
        let record = UserSettings {
            user: caller.subject.clone(),
            key: key.to_owned(),
            settings,
        };
        self.repo.insert(&record).await?;
        Ok(record)
    }

    #[instrument(skip(self, caller, settings))]
    pub async fn update(
        &self,
        caller: &Identity,
        key: &str,
        settings: Value,
    ) -> Result<UserSettings, DomainError> {
        info!("Updating user settings");
        let record = UserSettings {
            user: caller.subject.clone(),
            key: key.to_owned(),
            settings,
        };
        if !self.repo.update(&record).await? {
            return Err(DomainError::not_found(USER_SETTINGS_NOT_FOUND));
        }
        Ok(record)
    }

    #[instrument(skip(self, caller))]
    pub async fn delete(&self, caller: &Identity, key: &str) -> Result<(), DomainError> {
        info!("Deleting user settings");
        if !self.repo.delete(&caller.subject, key).await? {
            return Err(DomainError::not_found(USER_SETTINGS_NOT_FOUND));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_settings_test.rs"]
mod user_settings_test;
