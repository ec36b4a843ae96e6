use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::domain::error::DomainError;
use crate::domain::model::Module;

#[async_trait]
pub trait ModulesRepository: Send + Sync {
    async fn list<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<Module>, DomainError>;

    async fn find<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<Option<Module>, DomainError>;

    async fn find_many<C: ConnectionTrait>(
        &self,
        conn: &C,
        names: &[String],
    ) -> Result<Vec<Module>, DomainError>;

    async fn find_by_custom_names<C: ConnectionTrait>(
        &self,
        conn: &C,
        custom_names: &[String],
    ) -> Result<Vec<Module>, DomainError>;

    async fn insert<C: ConnectionTrait>(&self, conn: &C, module: &Module)
    -> Result<(), DomainError>;

    async fn set_custom_name<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
        custom_name: Option<&str>,
    ) -> Result<(), DomainError>;

    /// Returns false when nothing was deleted.
    async fn delete<C: ConnectionTrait>(&self, conn: &C, name: &str) -> Result<bool, DomainError>;
}
