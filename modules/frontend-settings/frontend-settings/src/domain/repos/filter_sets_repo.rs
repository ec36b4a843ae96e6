use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::domain::error::DomainError;
use crate::domain::model::FilterSet;

#[async_trait]
pub trait FilterSetsRepository: Send + Sync {
    /// The set, if `subject` owns it or it is public.
    async fn find_visible<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
        subject: &str,
    ) -> Result<Option<FilterSet>, DomainError>;

    /// Sets among `ids` owned by `subject`, ordered by id.
    async fn find_owned<C: ConnectionTrait>(
        &self,
        conn: &C,
        ids: &[i32],
        subject: &str,
    ) -> Result<Vec<FilterSet>, DomainError>;

    /// Sets visible to `subject` whose name is in `names`, except `exclude_ids`.
    async fn visible_named<C: ConnectionTrait>(
        &self,
        conn: &C,
        names: &[String],
        subject: &str,
        exclude_ids: &[i32],
    ) -> Result<Vec<FilterSet>, DomainError>;

    /// Owned sets first, then others' public sets, each ordered by id.
    async fn list_visible<C: ConnectionTrait>(
        &self,
        conn: &C,
        subject: &str,
    ) -> Result<Vec<FilterSet>, DomainError>;

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &FilterSet,
    ) -> Result<FilterSet, DomainError>;

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &FilterSet,
    ) -> Result<(), DomainError>;

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<(), DomainError>;
}
