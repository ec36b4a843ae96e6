use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::domain::defaults::DefaultSlotRepository;
use crate::domain::error::DomainError;
use crate::domain::model::{ColorRange, ColorRangeFilter, ColorRangeScope, DefaultsQuery};

#[async_trait]
pub trait ColorRangesRepository:
    DefaultSlotRepository<Scope = ColorRangeScope, Record = ColorRange>
{
    /// Record by id if it is public or owned by `subject`.
    async fn find_visible<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
        subject: &str,
    ) -> Result<Option<ColorRange>, DomainError>;

    /// Record created by the palette facade (empty owner) under the natural key.
    async fn find_system<C: ConnectionTrait>(
        &self,
        conn: &C,
        tmo_id: &str,
        tprm_id: &str,
        name: &str,
    ) -> Result<Option<ColorRange>, DomainError>;

    /// Inserts `record` ignoring its id; returns the new id.
    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &ColorRange,
    ) -> Result<i32, DomainError>;

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &ColorRange,
    ) -> Result<(), DomainError>;

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<(), DomainError>;

    /// Visible records matching `filter`, ordered by id.
    async fn filter<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: &ColorRangeFilter,
        subject: &str,
    ) -> Result<Vec<ColorRange>, DomainError>;

    /// Visible default records matching `query`, ordered by `tprm_id`,
    /// private before public, then newest first.
    async fn defaults<C: ConnectionTrait>(
        &self,
        conn: &C,
        query: &DefaultsQuery,
        subject: &str,
    ) -> Result<Vec<ColorRange>, DomainError>;
}
