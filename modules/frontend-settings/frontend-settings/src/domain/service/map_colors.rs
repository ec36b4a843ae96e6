use std::sync::Arc;

use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::Value;
use settings_auth::Identity;
use tracing::{debug, info, instrument};

use super::{DEFAULT_NOT_SET, NOT_VISIBLE};
use crate::domain::defaults::{
    BoundSlots, DefaultTransition, Visibility, enforce, guard_demotion, guard_removal,
};
use crate::domain::error::DomainError;
use crate::domain::model::{MapColor, MapColorScope, MapColorUpdate, NewMapColor};
use crate::domain::repos::MapColorsRepository;

/// Layer/attribute keyed color ranges used by the map view.
#[derive(Clone)]
pub struct MapColorsService<R: MapColorsRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
}

impl<R: MapColorsRepository> MapColorsService<R> {
    #[must_use]
    pub fn new(db: DatabaseConnection, repo: Arc<R>) -> Self {
        Self { db, repo }
    }

    #[instrument(skip(self, caller), fields(layer = %scope.layer, attribute = %scope.attribute))]
    pub async fn default_for(
        &self,
        caller: &Identity,
        scope: &MapColorScope,
    ) -> Result<MapColor, DomainError> {
        debug!("Getting default map color range");
        self.repo
            .default_for(&self.db, scope, &caller.subject)
            .await?
            .ok_or_else(|| DomainError::not_found(DEFAULT_NOT_SET))
    }

    #[instrument(skip(self, caller))]
    pub async fn attributes_with_default(
        &self,
        caller: &Identity,
        layer: &str,
    ) -> Result<Vec<String>, DomainError> {
        debug!("Listing attributes with a default");
        self.repo
            .attributes_with_default(&self.db, layer, &caller.subject)
            .await
    }

    #[instrument(skip(self, caller), fields(layer = %scope.layer, attribute = %scope.attribute))]
    pub async fn list(
        &self,
        caller: &Identity,
        scope: &MapColorScope,
    ) -> Result<Vec<MapColor>, DomainError> {
        debug!("Listing map color ranges");
        self.repo.list(&self.db, scope, &caller.subject).await
    }

    #[instrument(skip(self, caller))]
    pub async fn get(&self, caller: &Identity, id: i32) -> Result<MapColor, DomainError> {
        debug!("Getting map color range");
        self.repo
            .find_visible(&self.db, id, &caller.subject)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_VISIBLE))
    }

    #[instrument(skip(self, owner, new), fields(layer = %new.layer, attribute = %new.attribute))]
    pub async fn create(
        &self,
        owner: &Identity,
        new: NewMapColor,
        forced: bool,
    ) -> Result<i32, DomainError> {
        info!("Creating map color range");
        new.validate()?;

        let txn = self.db.begin().await?;
        if new.is_default {
            let slots = BoundSlots::new(self.repo.as_ref(), &txn);
            let visibility = Visibility::of(new.public, &owner.subject);
            enforce(&slots, &new.scope(), &visibility, forced).await?;
        }
        let id = self.repo.insert(&txn, &new.into_record(owner)).await?;
        txn.commit().await?;

        info!(id, "Created map color range");
        Ok(id)
    }

    #[instrument(skip(self, owner, update))]
    pub async fn update(
        &self,
        owner: &Identity,
        id: i32,
        update: MapColorUpdate,
        forced: bool,
    ) -> Result<(), DomainError> {
        info!("Replacing map color range");
        update.validate()?;

        let txn = self.db.begin().await?;
        let current = self
            .repo
            .find_visible(&txn, id, &owner.subject)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_VISIBLE))?;

        let transition = DefaultTransition {
            was_default: current.is_default,
            was_public: current.public,
            default: Some(update.is_default),
            public: Some(update.public),
            scope_changed: false,
        };
        guard_demotion(&transition, forced)?;

        let updated = MapColor {
            name: update.name,
            range: Value::Object(update.range),
            public: update.public,
            is_default: update.is_default,
            ..current
        };
        if transition.needs_enforcement() {
            let slots = BoundSlots::new(self.repo.as_ref(), &txn);
            let visibility = Visibility::of(updated.public, &updated.created_by_sub);
            enforce(&slots, &updated.scope(), &visibility, forced).await?;
        }
        self.repo.update(&txn, &updated).await?;
        txn.commit().await?;
        Ok(())
    }

    /// Only the owner may delete.
    #[instrument(skip(self, owner))]
    pub async fn delete(&self, owner: &Identity, id: i32, forced: bool) -> Result<(), DomainError> {
        info!("Deleting map color range");

        let txn = self.db.begin().await?;
        let current = self
            .repo
            .find_owned(&txn, id, &owner.subject)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_VISIBLE))?;
        guard_removal(current.public, current.is_default, forced)?;
        self.repo.delete(&txn, id).await?;
        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "map_colors_test.rs"]
mod map_colors_test;
