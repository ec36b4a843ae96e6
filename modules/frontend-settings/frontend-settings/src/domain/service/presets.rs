use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::{DatabaseConnection, TransactionTrait};
use settings_auth::Identity;
use tracing::{debug, info, instrument};

use super::DEFAULT_NOT_SET;
use crate::domain::defaults::{
    BoundSlots, DefaultTransition, Visibility, enforce, guard_demotion, guard_removal,
};
use crate::domain::error::DomainError;
use crate::domain::model::{Preset, PresetInput, PresetKind, PresetScope, require_non_empty};
use crate::domain::repos::PresetsRepository;

pub const SETTING_NOT_FOUND: &str = "Setting not found";
pub const SETTINGS_NOT_FOUND: &str = "Settings not found";

/// Table columns, table filters and object params: one service, parameterised
/// per call by [`PresetKind`].
#[derive(Clone)]
pub struct PresetsService<R: PresetsRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
}

fn positive_tmo(tmo_id: i64) -> Result<(), DomainError> {
    if tmo_id <= 0 {
        return Err(DomainError::validation(
            "tmo_id",
            "Input should be greater than 0",
        ));
    }
    Ok(())
}

impl<R: PresetsRepository> PresetsService<R> {
    #[must_use]
    pub fn new(db: DatabaseConnection, repo: Arc<R>) -> Self {
        Self { db, repo }
    }

    /// Private default first; `None` when the object type has no default.
    #[instrument(skip(self, caller), fields(kind = kind.as_str()))]
    pub async fn default_for(
        &self,
        caller: &Identity,
        kind: PresetKind,
        tmo_id: i64,
    ) -> Result<Option<Preset>, DomainError> {
        debug!("Getting default preset");
        positive_tmo(tmo_id)?;
        self.repo
            .default_for(&self.db, &PresetScope { kind, tmo_id }, &caller.subject)
            .await
    }

    /// Like [`Self::default_for`] but a missing default is an error.
    #[instrument(skip(self, caller), fields(kind = kind.as_str()))]
    pub async fn require_default(
        &self,
        caller: &Identity,
        kind: PresetKind,
        tmo_id: i64,
    ) -> Result<Preset, DomainError> {
        self.default_for(caller, kind, tmo_id)
            .await?
            .ok_or_else(|| DomainError::not_found(DEFAULT_NOT_SET))
    }

    /// The caller's own presets, then public presets of object types the
    /// caller has none of.
    #[instrument(skip(self, caller), fields(kind = kind.as_str()))]
    pub async fn list_all(
        &self,
        caller: &Identity,
        kind: PresetKind,
    ) -> Result<Vec<Preset>, DomainError> {
        debug!("Listing presets across object types");
        let mut own = self.repo.list_owned(&self.db, kind, &caller.subject).await?;
        let covered: Vec<i64> = own
            .iter()
            .map(|p| p.tmo_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let public = self.repo.list_public_except(&self.db, kind, &covered).await?;
        own.extend(public);
        Ok(own)
    }

    #[instrument(skip(self, caller), fields(kind = kind.as_str()))]
    pub async fn list(
        &self,
        caller: &Identity,
        kind: PresetKind,
        tmo_id: i64,
    ) -> Result<Vec<Preset>, DomainError> {
        debug!("Listing presets");
        positive_tmo(tmo_id)?;
        self.repo
            .list(&self.db, &PresetScope { kind, tmo_id }, &caller.subject)
            .await
    }

    /// Same as [`Self::list`], but an empty result is reported as not found.
    #[instrument(skip(self, caller), fields(kind = kind.as_str()))]
    pub async fn list_non_empty(
        &self,
        caller: &Identity,
        kind: PresetKind,
        tmo_id: i64,
    ) -> Result<Vec<Preset>, DomainError> {
        let presets = self.list(caller, kind, tmo_id).await?;
        if presets.is_empty() {
            return Err(DomainError::not_found(SETTINGS_NOT_FOUND));
        }
        Ok(presets)
    }

    #[instrument(skip(self, caller), fields(kind = kind.as_str()))]
    pub async fn get(
        &self,
        caller: &Identity,
        kind: PresetKind,
        id: i32,
    ) -> Result<Preset, DomainError> {
        debug!("Getting preset");
        self.repo
            .find_visible(&self.db, kind, id, &caller.subject)
            .await?
            .ok_or_else(|| DomainError::not_found(SETTING_NOT_FOUND))
    }

    #[instrument(skip(self, owner, input), fields(kind = kind.as_str(), name = %input.name))]
    pub async fn create(
        &self,
        owner: &Identity,
        kind: PresetKind,
        tmo_id: i64,
        input: PresetInput,
        forced: bool,
    ) -> Result<i32, DomainError> {
        info!("Creating preset");
        positive_tmo(tmo_id)?;
        require_non_empty("name", &input.name)?;

        let txn = self.db.begin().await?;
        if input.is_default {
            let slots = BoundSlots::new(self.repo.as_ref(), &txn);
            let visibility = Visibility::of(input.public, &owner.subject);
            enforce(&slots, &PresetScope { kind, tmo_id }, &visibility, forced).await?;
        }
        let id = self
            .repo
            .insert(&txn, &input.into_record(kind, tmo_id, owner))
            .await?;
        txn.commit().await?;

        info!(id, "Created preset");
        Ok(id)
    }

    #[instrument(skip(self, owner, input), fields(kind = kind.as_str()))]
    pub async fn update(
        &self,
        owner: &Identity,
        kind: PresetKind,
        id: i32,
        input: PresetInput,
        forced: bool,
    ) -> Result<(), DomainError> {
        info!("Replacing preset");
        require_non_empty("name", &input.name)?;

        let txn = self.db.begin().await?;
        let current = self
            .repo
            .find_visible(&txn, kind, id, &owner.subject)
            .await?
            .ok_or_else(|| DomainError::not_found(SETTING_NOT_FOUND))?;

        let transition = DefaultTransition {
            was_default: current.is_default,
            was_public: current.public,
            default: Some(input.is_default),
            public: Some(input.public),
            scope_changed: false,
        };
        guard_demotion(&transition, forced)?;

        let mut updated = current;
        updated.replace_with(input);
        if transition.needs_enforcement() {
            let slots = BoundSlots::new(self.repo.as_ref(), &txn);
            let visibility = Visibility::of(updated.public, &updated.created_by_sub);
            enforce(&slots, &updated.scope(), &visibility, forced).await?;
        }
        self.repo.update(&txn, &updated).await?;
        txn.commit().await?;
        Ok(())
    }

    #[instrument(skip(self, owner), fields(kind = kind.as_str()))]
    pub async fn delete(
        &self,
        owner: &Identity,
        kind: PresetKind,
        id: i32,
        forced: bool,
    ) -> Result<(), DomainError> {
        info!("Deleting preset");

        let txn = self.db.begin().await?;
        let current = self
            .repo
            .find_visible(&txn, kind, id, &owner.subject)
            .await?
            .ok_or_else(|| DomainError::not_found(SETTING_NOT_FOUND))?;
        guard_removal(current.public, current.is_default, forced)?;
        self.repo.delete(&txn, id).await?;
        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "presets_test.rs"]
mod presets_test;
