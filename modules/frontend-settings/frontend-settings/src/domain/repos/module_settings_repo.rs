use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::domain::error::DomainError;
use crate::domain::model::{LogFilter, ModuleSettings, SettingsLog};

/// Module settings and their audit trail.
///
/// Slice arguments are bound as statement parameters, so callers keep them
/// within the configured per-query limit.
#[async_trait]
pub trait ModuleSettingsRepository: Send + Sync {
    async fn list<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<ModuleSettings>, DomainError>;

    async fn find_many<C: ConnectionTrait>(
        &self,
        conn: &C,
        module_names: &[String],
    ) -> Result<Vec<ModuleSettings>, DomainError>;

    async fn insert_many<C: ConnectionTrait>(
        &self,
        conn: &C,
        items: &[ModuleSettings],
    ) -> Result<(), DomainError>;

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        item: &ModuleSettings,
    ) -> Result<(), DomainError>;

    async fn delete_many<C: ConnectionTrait>(
        &self,
        conn: &C,
        module_names: &[String],
    ) -> Result<(), DomainError>;

    async fn insert_logs<C: ConnectionTrait>(
        &self,
        conn: &C,
        logs: &[SettingsLog],
    ) -> Result<(), DomainError>;

    /// Matching rows for the requested page plus the total match count.
    async fn query_logs<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: &LogFilter,
    ) -> Result<(Vec<SettingsLog>, u64), DomainError>;
}
