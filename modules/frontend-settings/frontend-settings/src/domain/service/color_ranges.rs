use std::collections::HashSet;
use std::sync::Arc;

use sea_orm::{DatabaseConnection, TransactionTrait};
use settings_auth::Identity;
use tracing::{debug, info, instrument};

use super::NOT_VISIBLE;
use crate::domain::defaults::{
    BoundSlots, DefaultTransition, Visibility, enforce, guard_demotion, guard_removal,
};
use crate::domain::error::DomainError;
use crate::domain::model::{
    ColorRange, ColorRangeFilter, ColorRangePatch, DefaultsQuery, NewColorRange,
};
use crate::domain::repos::ColorRangesRepository;

pub const MISSING_SEARCH_PARAMETER: &str = "You must specify at least one search parameter";

#[derive(Clone)]
pub struct ColorRangesService<R: ColorRangesRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
    filter_max_limit: u64,
}

impl<R: ColorRangesRepository> ColorRangesService<R> {
    #[must_use]
    pub fn new(db: DatabaseConnection, repo: Arc<R>, filter_max_limit: u64) -> Self {
        Self {
            db,
            repo,
            filter_max_limit,
        }
    }

    #[instrument(skip(self, owner, new), fields(tmo_id = %new.tmo_id, tprm_id = %new.tprm_id))]
    pub async fn create(
        &self,
        owner: &Identity,
        new: NewColorRange,
        forced: bool,
    ) -> Result<i32, DomainError> {
        info!("Creating color range");
        new.validate()?;

        let txn = self.db.begin().await?;
        if new.is_default {
            let slots = BoundSlots::new(self.repo.as_ref(), &txn);
            let visibility = Visibility::of(new.public, &owner.subject);
            if let Some(prev) = enforce(&slots, &new.scope(), &visibility, forced).await? {
                info!(demoted = prev.id, "Replaced default color range");
            }
        }
        let id = self.repo.insert(&txn, &new.into_record(owner)).await?;
        txn.commit().await?;

        info!(id, "Created color range");
        Ok(id)
    }

    #[instrument(skip(self, owner, patch))]
    pub async fn update(
        &self,
        owner: &Identity,
        id: i32,
        patch: ColorRangePatch,
        forced: bool,
    ) -> Result<(), DomainError> {
        info!("Updating color range");
        patch.validate()?;

        let txn = self.db.begin().await?;
        let current = self
            .repo
            .find_visible(&txn, id, &owner.subject)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_VISIBLE))?;

        let transition = DefaultTransition {
            was_default: current.is_default,
            was_public: current.public,
            default: patch.is_default,
            public: patch.public,
            scope_changed: patch
                .val_type
                .as_ref()
                .is_some_and(|v| *v != current.val_type),
        };
        guard_demotion(&transition, forced)?;

        let mut updated = current;
        updated.apply(patch);

        if transition.needs_enforcement() {
            let slots = BoundSlots::new(self.repo.as_ref(), &txn);
            let visibility = Visibility::of(updated.public, &updated.created_by_sub);
            enforce(&slots, &updated.scope(), &visibility, forced).await?;
        }
        self.repo.update(&txn, &updated).await?;
        txn.commit().await?;

        info!("Updated color range");
        Ok(())
    }

    #[instrument(skip(self, owner))]
    pub async fn delete(&self, owner: &Identity, id: i32, forced: bool) -> Result<(), DomainError> {
        info!("Deleting color range");

        let txn = self.db.begin().await?;
        let current = self
            .repo
            .find_visible(&txn, id, &owner.subject)
            .await?
            .ok_or_else(|| DomainError::not_found(NOT_VISIBLE))?;
        guard_removal(current.public, current.is_default, forced)?;
        self.repo.delete(&txn, id).await?;
        txn.commit().await?;

        info!("Deleted color range");
        Ok(())
    }

    #[instrument(skip(self, caller, filter), fields(limit = filter.limit, offset = filter.offset))]
    pub async fn filter(
        &self,
        caller: &Identity,
        filter: &ColorRangeFilter,
    ) -> Result<Vec<ColorRange>, DomainError> {
        debug!("Filtering color ranges");
        if filter.limit == 0 || filter.limit > self.filter_max_limit {
            return Err(DomainError::validation(
                "limit",
                format!("Input should be between 1 and {}", self.filter_max_limit),
            ));
        }
        self.repo.filter(&self.db, filter, &caller.subject).await
    }

    /// One default per `tprm_id`: the caller's private one when present,
    /// otherwise the newest public one.
    #[instrument(skip(self, caller, query))]
    pub async fn defaults(
        &self,
        caller: &Identity,
        query: &DefaultsQuery,
    ) -> Result<Vec<ColorRange>, DomainError> {
        debug!("Resolving default color ranges");
        if query.tmo_id.is_none() && query.tprm_id.is_none() {
            return Err(DomainError::validation("tmo_id", MISSING_SEARCH_PARAMETER));
        }

        let ranked = self.repo.defaults(&self.db, query, &caller.subject).await?;
        let mut seen = HashSet::new();
        Ok(ranked
            .into_iter()
            .filter(|r| seen.insert(r.tprm_id.clone()))
            .collect())
    }
}

#[cfg(test)]
#[path = "color_ranges_test.rs"]
mod color_ranges_test;
