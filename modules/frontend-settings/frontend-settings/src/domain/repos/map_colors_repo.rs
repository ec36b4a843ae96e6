use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::domain::defaults::DefaultSlotRepository;
use crate::domain::error::DomainError;
use crate::domain::model::{MapColor, MapColorScope};

#[async_trait]
pub trait MapColorsRepository:
    DefaultSlotRepository<Scope = MapColorScope, Record = MapColor>
{
    async fn find_visible<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
        subject: &str,
    ) -> Result<Option<MapColor>, DomainError>;

    async fn find_owned<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
        subject: &str,
    ) -> Result<Option<MapColor>, DomainError>;

    /// Visible default for the scope, private first.
    async fn default_for<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &MapColorScope,
        subject: &str,
    ) -> Result<Option<MapColor>, DomainError>;

    /// Sorted distinct attributes of `layer` having a visible default.
    async fn attributes_with_default<C: ConnectionTrait>(
        &self,
        conn: &C,
        layer: &str,
        subject: &str,
    ) -> Result<Vec<String>, DomainError>;

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &MapColorScope,
        subject: &str,
    ) -> Result<Vec<MapColor>, DomainError>;

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &MapColor,
    ) -> Result<i32, DomainError>;

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &MapColor,
    ) -> Result<(), DomainError>;

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<(), DomainError>;
}
