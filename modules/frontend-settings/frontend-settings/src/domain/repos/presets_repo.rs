use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use crate::domain::defaults::DefaultSlotRepository;
use crate::domain::error::DomainError;
use crate::domain::model::{Preset, PresetKind, PresetScope};

#[async_trait]
pub trait PresetsRepository: DefaultSlotRepository<Scope = PresetScope, Record = Preset> {
    async fn find_visible<C: ConnectionTrait>(
        &self,
        conn: &C,
        kind: PresetKind,
        id: i32,
        subject: &str,
    ) -> Result<Option<Preset>, DomainError>;

    /// Visible default for the scope, private first.
    async fn default_for<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &PresetScope,
        subject: &str,
    ) -> Result<Option<Preset>, DomainError>;

    /// Visible presets of one object type, ordered by id.
    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &PresetScope,
        subject: &str,
    ) -> Result<Vec<Preset>, DomainError>;

    /// Presets owned by `subject`, ordered by id.
    async fn list_owned<C: ConnectionTrait>(
        &self,
        conn: &C,
        kind: PresetKind,
        subject: &str,
    ) -> Result<Vec<Preset>, DomainError>;

    /// Public presets whose `tmo_id` is not in `exclude_tmo_ids`, ordered by id.
    async fn list_public_except<C: ConnectionTrait>(
        &self,
        conn: &C,
        kind: PresetKind,
        exclude_tmo_ids: &[i64],
    ) -> Result<Vec<Preset>, DomainError>;

    async fn insert<C: ConnectionTrait>(&self, conn: &C, record: &Preset)
    -> Result<i32, DomainError>;

    async fn update<C: ConnectionTrait>(&self, conn: &C, record: &Preset)
    -> Result<(), DomainError>;

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<(), DomainError>;
}
