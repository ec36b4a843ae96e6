use async_trait::async_trait;

use crate::domain::model::UserSettings;

#[async_trait]
pub trait UserSettingsRepository: Send + Sync {
    async fn list_keys(&self, user: &str) -> anyhow::Result<Vec<String>>;

    async fn find(&self, user: &str, key: &str) -> anyhow::Result<Option<UserSettings>>;

    async fn insert(&self, settings: &UserSettings) -> anyhow::Result<()>;

    /// Returns false when no row matched.
    async fn update(&self, settings: &UserSettings) -> anyhow::Result<bool>;

    /// Returns false when no row matched.
    async fn delete(&self, user: &str, key: &str) -> anyhow::Result<bool>;
}
