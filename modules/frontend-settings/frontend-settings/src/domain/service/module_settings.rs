use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::{Map, Value};
use settings_auth::Identity;
use tracing::{debug, info, instrument};

use crate::domain::audit::{LeafChange, diff};
use crate::domain::error::{DomainError, name_list};
use crate::domain::model::{LogFilter, ModuleSettings, SettingsLog, SettingsLogPage};
use crate::domain::repos::{ModuleSettingsRepository, ModulesRepository};

pub const DATE_RANGE_INVERTED: &str = "the from_date cannot be greater than or equal to_date";

fn modules_missing(names: &[String]) -> DomainError {
    DomainError::not_found(format!(
        "Modules with names: {} do not exist",
        name_list(names)
    ))
}

fn settings_missing(names: &[String]) -> DomainError {
    DomainError::not_found(format!(
        "Module Settings for Modules with names: {} do not exist",
        name_list(names)
    ))
}

fn settings_exist(names: &[String]) -> DomainError {
    DomainError::conflict(format!(
        "Module Settings for Modules with names: {} already exist",
        name_list(names)
    ))
}

/// Names repeated within `names`, in first-seen order.
fn duplicates<'n>(names: impl Iterator<Item = &'n str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    names
        .filter(|n| !seen.insert(*n) && reported.insert(*n))
        .map(str::to_owned)
        .collect()
}

/// Requested names absent from `found`, deduplicated and sorted.
fn absent(requested: &[String], found: &HashSet<&str>) -> Vec<String> {
    requested
        .iter()
        .filter(|n| !found.contains(n.as_str()))
        .map(String::as_str)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn single(mut batch: Vec<ModuleSettings>) -> Result<ModuleSettings, DomainError> {
    batch
        .pop()
        .ok_or_else(|| DomainError::Database(anyhow::anyhow!("one-item batch returned nothing")))
}

fn logs_for(
    module: &str,
    user: &str,
    changes: Vec<LeafChange>,
) -> impl Iterator<Item = SettingsLog> + use<> {
    let change_time = Utc::now();
    let module = module.to_owned();
    let user = user.to_owned();
    changes.into_iter().map(move |c| SettingsLog {
        domain: module.clone(),
        variable: c.variable,
        user: user.clone(),
        change_time,
        old_value: c.old_value,
        new_value: c.new_value,
    })
}

/// Module settings documents and the audit trail of their leaf values.
///
/// Batches are processed in chunks of `chunk_size` items so that each
/// lookup stays within the statement parameter limit. Every chunk is
/// validated before the first write and the whole batch commits at once.
#[derive(Clone)]
pub struct ModuleSettingsService<M: ModulesRepository, S: ModuleSettingsRepository> {
    db: DatabaseConnection,
    modules: Arc<M>,
    repo: Arc<S>,
    chunk_size: usize,
}

impl<M: ModulesRepository, S: ModuleSettingsRepository> ModuleSettingsService<M, S> {
    #[must_use]
    pub fn new(db: DatabaseConnection, modules: Arc<M>, repo: Arc<S>, chunk_size: usize) -> Self {
        Self {
            db,
            modules,
            repo,
            chunk_size: chunk_size.max(1),
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ModuleSettings>, DomainError> {
        debug!("Listing module settings");
        self.repo.list(&self.db).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, module_name: &str) -> Result<ModuleSettings, DomainError> {
        debug!("Getting module settings");
        let names = [module_name.to_owned()];
        if self.modules.find(&self.db, module_name).await?.is_none() {
            return Err(modules_missing(&names));
        }
        self.repo
            .find_many(&self.db, &names)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| settings_missing(&names))
    }

    async fn check_modules<C: ConnectionTrait>(
        &self,
        conn: &C,
        names: &[String],
    ) -> Result<(), DomainError> {
        let found = self.modules.find_many(conn, names).await?;
        let found: HashSet<&str> = found.iter().map(|m| m.name.as_str()).collect();
        let missing = absent(names, &found);
        if !missing.is_empty() {
            return Err(modules_missing(&missing));
        }
        Ok(())
    }

    async fn check_settings_present<C: ConnectionTrait>(
        &self,
        conn: &C,
        names: &[String],
    ) -> Result<(), DomainError> {
        let found = self.repo.find_many(conn, names).await?;
        let found: HashSet<&str> = found.iter().map(|s| s.module_name.as_str()).collect();
        let missing = absent(names, &found);
        if !missing.is_empty() {
            return Err(settings_missing(&missing));
        }
        Ok(())
    }

    async fn check_settings_absent<C: ConnectionTrait>(
        &self,
        conn: &C,
        names: &[String],
    ) -> Result<(), DomainError> {
        let found = self.repo.find_many(conn, names).await?;
        if !found.is_empty() {
            let mut taken: Vec<String> = found.into_iter().map(|s| s.module_name).collect();
            taken.sort();
            return Err(settings_exist(&taken));
        }
        Ok(())
    }

    /// Over the whole batch, before any chunk is looked at.
    fn check_duplicates<'n>(names: impl Iterator<Item = &'n str>) -> Result<(), DomainError> {
        let dups = duplicates(names);
        if !dups.is_empty() {
            return Err(DomainError::conflict(format!(
                "There are duplications of module names: {}",
                name_list(&dups)
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, user, item), fields(module = %item.module_name))]
    pub async fn create(
        &self,
        user: &Identity,
        item: ModuleSettings,
    ) -> Result<ModuleSettings, DomainError> {
        single(self.create_many(user, vec![item]).await?)
    }

    /// Inserts settings for modules that have none yet; every leaf is logged
    /// as added. Returns the stored documents in input order.
    #[instrument(skip(self, user, items), fields(count = items.len()))]
    pub async fn create_many(
        &self,
        user: &Identity,
        items: Vec<ModuleSettings>,
    ) -> Result<Vec<ModuleSettings>, DomainError> {
        info!("Creating module settings");
        Self::check_duplicates(items.iter().map(|i| i.module_name.as_str()))?;
        let txn = self.db.begin().await?;

        for chunk in items.chunks(self.chunk_size) {
            let names: Vec<String> = chunk.iter().map(|i| i.module_name.clone()).collect();
            self.check_modules(&txn, &names).await?;
            self.check_settings_absent(&txn, &names).await?;
        }

        let empty = Map::new();
        for chunk in items.chunks(self.chunk_size) {
            self.repo.insert_many(&txn, chunk).await?;
            let logs: Vec<SettingsLog> = chunk
                .iter()
                .flat_map(|i| logs_for(&i.module_name, &user.name, diff(&empty, &i.settings)))
                .collect();
            self.repo.insert_logs(&txn, &logs).await?;
        }
        txn.commit().await?;

        info!("Created module settings");
        Ok(items)
    }

    #[instrument(skip(self, user, settings))]
    pub async fn update(
        &self,
        user: &Identity,
        module_name: &str,
        settings: Map<String, Value>,
    ) -> Result<ModuleSettings, DomainError> {
        let item = ModuleSettings {
            module_name: module_name.to_owned(),
            settings,
        };
        single(self.update_many(user, vec![item]).await?)
    }

    /// Replaces whole settings documents and logs the leaf-level diff.
    /// Returns the new documents in input order.
    #[instrument(skip(self, user, items), fields(count = items.len()))]
    pub async fn update_many(
        &self,
        user: &Identity,
        items: Vec<ModuleSettings>,
    ) -> Result<Vec<ModuleSettings>, DomainError> {
        info!("Updating module settings");
        Self::check_duplicates(items.iter().map(|i| i.module_name.as_str()))?;
        let txn = self.db.begin().await?;

        for chunk in items.chunks(self.chunk_size) {
            let names: Vec<String> = chunk.iter().map(|i| i.module_name.clone()).collect();
            self.check_modules(&txn, &names).await?;
            self.check_settings_present(&txn, &names).await?;
        }

        for chunk in items.chunks(self.chunk_size) {
            let names: Vec<String> = chunk.iter().map(|i| i.module_name.clone()).collect();
            let before: HashMap<String, Map<String, Value>> = self
                .repo
                .find_many(&txn, &names)
                .await?
                .into_iter()
                .map(|s| (s.module_name, s.settings))
                .collect();

            let mut logs = Vec::new();
            for item in chunk {
                let old = before.get(&item.module_name).cloned().unwrap_or_default();
                logs.extend(logs_for(
                    &item.module_name,
                    &user.name,
                    diff(&old, &item.settings),
                ));
                self.repo.update(&txn, item).await?;
            }
            self.repo.insert_logs(&txn, &logs).await?;
        }
        txn.commit().await?;

        info!("Updated module settings");
        Ok(items)
    }

    #[instrument(skip(self, user))]
    pub async fn delete(&self, user: &Identity, module_name: &str) -> Result<(), DomainError> {
        self.delete_many(user, vec![module_name.to_owned()]).await
    }

    /// Removes settings documents; every leaf is logged as removed.
    #[instrument(skip(self, user, module_names), fields(count = module_names.len()))]
    pub async fn delete_many(
        &self,
        user: &Identity,
        module_names: Vec<String>,
    ) -> Result<(), DomainError> {
        info!("Deleting module settings");
        Self::check_duplicates(module_names.iter().map(String::as_str))?;
        let txn = self.db.begin().await?;

        for chunk in module_names.chunks(self.chunk_size) {
            self.check_settings_present(&txn, chunk).await?;
        }

        let empty = Map::new();
        for chunk in module_names.chunks(self.chunk_size) {
            let logs: Vec<SettingsLog> = self
                .repo
                .find_many(&txn, chunk)
                .await?
                .iter()
                .flat_map(|s| logs_for(&s.module_name, &user.name, diff(&s.settings, &empty)))
                .collect();
            self.repo.insert_logs(&txn, &logs).await?;
            self.repo.delete_many(&txn, chunk).await?;
        }
        txn.commit().await?;

        info!("Deleted module settings");
        Ok(())
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, offset = filter.offset))]
    pub async fn logs(&self, filter: &LogFilter) -> Result<SettingsLogPage, DomainError> {
        debug!("Querying module settings logs");
        if filter.limit == 0 {
            return Err(DomainError::validation(
                "limit",
                "Input should be greater than 0",
            ));
        }
        if let (Some(from), Some(to)) = (filter.from_date, filter.to_date)
            && from >= to
        {
            return Err(DomainError::validation("to_date", DATE_RANGE_INVERTED));
        }

        let (elements, total_count) = self.repo.query_logs(&self.db, filter).await?;
        Ok(SettingsLogPage {
            total_count,
            page_count: total_count.div_ceil(filter.limit),
            elements,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn duplicates_are_reported_once_in_order() {
        assert_eq!(
            duplicates(["b", "a", "b", "a", "b", "c"].into_iter()),
            names(&["b", "a"])
        );
        assert!(duplicates(["a", "b"].into_iter()).is_empty());
    }

    #[test]
    fn absent_names_are_sorted_and_unique() {
        let requested = names(&["z", "a", "z", "m"]);
        let found: HashSet<&str> = ["m"].into_iter().collect();
        assert_eq!(absent(&requested, &found), names(&["a", "z"]));
    }
}

#[cfg(test)]
#[path = "module_settings_test.rs"]
mod module_settings_test;
