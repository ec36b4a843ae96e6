use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use sea_orm::{DatabaseConnection, TransactionTrait};
use settings_auth::Identity;
use tracing::{debug, info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::{FilterSet, FilterSetInput, FilterSetPatch, require_non_empty};
use crate::domain::repos::FilterSetsRepository;

fn name_taken(name: &str) -> DomainError {
    DomainError::bad_request(format!("FilterSet named {name} already exists."))
}

fn missing(id: i32) -> DomainError {
    DomainError::bad_request(format!("FilterSet with id = {id} does not exist!"))
}

/// Saved process filter sets. Names are unique among the sets a caller can
/// see: their own and every public one.
#[derive(Clone)]
pub struct FilterSetsService<R: FilterSetsRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
}

impl<R: FilterSetsRepository> FilterSetsService<R> {
    #[must_use]
    pub fn new(db: DatabaseConnection, repo: Arc<R>) -> Self {
        Self { db, repo }
    }

    /// Own sets first, then public sets of other users.
    #[instrument(skip(self, caller))]
    pub async fn list(&self, caller: &Identity) -> Result<Vec<FilterSet>, DomainError> {
        debug!("Listing filter sets");
        self.repo.list_visible(&self.db, &caller.subject).await
    }

    #[instrument(skip(self, caller))]
    pub async fn get(&self, caller: &Identity, id: i32) -> Result<FilterSet, DomainError> {
        debug!("Getting filter set");
        self.repo
            .find_visible(&self.db, id, &caller.subject)
            .await?
            .ok_or_else(|| missing(id))
    }

    #[instrument(skip(self, owner, input), fields(name = %input.name))]
    pub async fn create(
        &self,
        owner: &Identity,
        input: FilterSetInput,
    ) -> Result<FilterSet, DomainError> {
        info!("Creating filter set");
        require_non_empty("name", &input.name)?;

        let txn = self.db.begin().await?;
        let taken = self
            .repo
            .visible_named(&txn, &[input.name.clone()], &owner.subject, &[])
            .await?;
        if !taken.is_empty() {
            return Err(name_taken(&input.name));
        }
        let created = self.repo.insert(&txn, &input.into_record(owner)).await?;
        txn.commit().await?;

        info!(id = created.id, "Created filter set");
        Ok(created)
    }

    /// Replaces an owned set.
    #[instrument(skip(self, owner, input))]
    pub async fn update(
        &self,
        owner: &Identity,
        id: i32,
        input: FilterSetInput,
    ) -> Result<FilterSet, DomainError> {
        info!("Replacing filter set");
        require_non_empty("name", &input.name)?;

        let txn = self.db.begin().await?;
        let mut current = self
            .repo
            .find_owned(&txn, &[id], &owner.subject)
            .await?
            .pop()
            .ok_or_else(|| missing(id))?;
        let taken = self
            .repo
            .visible_named(&txn, &[input.name.clone()], &owner.subject, &[id])
            .await?;
        if !taken.is_empty() {
            return Err(name_taken(&input.name));
        }
        current.replace_with(input);
        self.repo.update(&txn, &current).await?;
        txn.commit().await?;
        Ok(current)
    }

    /// Applies every patch or none. A later patch for the same id wins.
    /// Returns the updated sets ordered by id.
    #[instrument(skip(self, owner, patches), fields(count = patches.len()))]
    pub async fn update_many(
        &self,
        owner: &Identity,
        patches: Vec<FilterSetPatch>,
    ) -> Result<Vec<FilterSet>, DomainError> {
        info!("Updating filter sets");
        let mut by_id: BTreeMap<i32, FilterSetPatch> = BTreeMap::new();
        for patch in patches {
            if patch.id <= 0 {
                return Err(DomainError::validation("id", "Input should be greater than 0"));
            }
            by_id.insert(patch.id, patch);
        }

        let mut renamed: BTreeMap<&str, BTreeSet<i32>> = BTreeMap::new();
        for patch in by_id.values() {
            if let Some(name) = patch.name.as_deref() {
                require_non_empty("name", name)?;
                renamed.entry(name).or_default().insert(patch.id);
            }
        }

        let txn = self.db.begin().await?;
        if !renamed.is_empty() {
            let names: Vec<String> = renamed.keys().map(|n| (*n).to_owned()).collect();
            let clashes: Vec<String> = self
                .repo
                .visible_named(&txn, &names, &owner.subject, &[])
                .await?
                .into_iter()
                .filter(|set| {
                    renamed
                        .get(set.name.as_str())
                        .is_some_and(|ids| !ids.contains(&set.id))
                })
                .map(|set| format!("'{}'", set.name))
                .collect();
            if !clashes.is_empty() {
                return Err(DomainError::bad_request(format!(
                    "FilterSets named: [{}] already exist.",
                    clashes.join(", ")
                )));
            }
        }

        let ids: Vec<i32> = by_id.keys().copied().collect();
        let mut owned = self.repo.find_owned(&txn, &ids, &owner.subject).await?;
        if owned.len() != ids.len() {
            let found: BTreeSet<i32> = owned.iter().map(|s| s.id).collect();
            let absent: Vec<String> = ids
                .iter()
                .filter(|id| !found.contains(id))
                .map(ToString::to_string)
                .collect();
            return Err(DomainError::not_found(format!(
                "FilterSets with id: [{}] do not exist!",
                absent.join(", ")
            )));
        }

        for set in &mut owned {
            if let Some(patch) = by_id.remove(&set.id) {
                set.apply(patch);
            }
            self.repo.update(&txn, set).await?;
        }
        txn.commit().await?;
        Ok(owned)
    }

    #[instrument(skip(self, owner))]
    pub async fn delete(&self, owner: &Identity, id: i32) -> Result<(), DomainError> {
        info!("Deleting filter set");
        let txn = self.db.begin().await?;
        if self
            .repo
            .find_owned(&txn, &[id], &owner.subject)
            .await?
            .is_empty()
        {
            return Err(missing(id));
        }
        self.repo.delete(&txn, id).await?;
        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "filter_sets_test.rs"]
mod filter_sets_test;
