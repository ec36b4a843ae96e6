use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument};

use crate::domain::error::{DomainError, name_list};
use crate::domain::model::Module;
use crate::domain::repos::ModulesRepository;

pub const NON_UNIQUE_CUSTOM_NAMES: &str = "The query contains non-unique custom names";

pub(crate) fn source_missing(name: &str) -> DomainError {
    DomainError::not_found(format!("Source with name={name} does not exist!"))
}

/// Module name to custom display name.
pub type ModuleNames = BTreeMap<String, Option<String>>;

#[derive(Clone)]
pub struct ModulesService<R: ModulesRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
}

impl<R: ModulesRepository> ModulesService<R> {
    #[must_use]
    pub fn new(db: DatabaseConnection, repo: Arc<R>) -> Self {
        Self { db, repo }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<ModuleNames, DomainError> {
        debug!("Listing modules");
        let modules = self.repo.list(&self.db).await?;
        Ok(modules.into_iter().map(|m| (m.name, m.custom_name)).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, name: &str) -> Result<Module, DomainError> {
        debug!("Getting module");
        self.repo
            .find(&self.db, name)
            .await?
            .ok_or_else(|| source_missing(name))
    }

    /// Applies custom names to the modules that exist; unknown names are
    /// skipped. Returns what was applied.
    #[instrument(skip(self, names), fields(count = names.len()))]
    pub async fn rename_many(&self, names: ModuleNames) -> Result<ModuleNames, DomainError> {
        info!("Renaming modules");

        let requested: Vec<String> = names.values().flatten().cloned().collect();
        let unique: HashSet<&String> = requested.iter().collect();
        if unique.len() != requested.len() {
            return Err(DomainError::bad_request(NON_UNIQUE_CUSTOM_NAMES));
        }

        let txn = self.db.begin().await?;
        let taken: Vec<String> = self
            .repo
            .find_by_custom_names(&txn, &requested)
            .await?
            .into_iter()
            .filter(|m| !names.contains_key(&m.name))
            .filter_map(|m| m.custom_name)
            .collect();
        if !taken.is_empty() {
            return Err(DomainError::bad_request(format!(
                "Modules with custom_names={} already exist!",
                name_list(&taken)
            )));
        }

        let keys: Vec<String> = names.keys().cloned().collect();
        let existing = self.repo.find_many(&txn, &keys).await?;
        // Released first so names can move between modules of the batch.
        for module in existing.iter().filter(|m| m.custom_name.is_some()) {
            self.repo.set_custom_name(&txn, &module.name, None).await?;
        }
        let mut applied = ModuleNames::new();
        for module in existing {
            let custom = names.get(&module.name).cloned().flatten();
            self.repo
                .set_custom_name(&txn, &module.name, custom.as_deref())
                .await?;
            applied.insert(module.name, custom);
        }
        txn.commit().await?;

        info!(applied = applied.len(), "Renamed modules");
        Ok(applied)
    }

    #[instrument(skip(self))]
    pub async fn rename(&self, name: &str, custom_name: &str) -> Result<Module, DomainError> {
        info!("Renaming module");

        let txn = self.db.begin().await?;
        let mut module = self
            .repo
            .find(&txn, name)
            .await?
            .ok_or_else(|| source_missing(name))?;

        let holders = self
            .repo
            .find_by_custom_names(&txn, &[custom_name.to_owned()])
            .await?;
        if holders.iter().any(|m| m.name != name) {
            return Err(DomainError::bad_request(format!(
                "Module named '{custom_name}' already exists!"
            )));
        }

        self.repo
            .set_custom_name(&txn, name, Some(custom_name))
            .await?;
        txn.commit().await?;

        module.custom_name = Some(custom_name.to_owned());
        Ok(module)
    }

    #[instrument(skip(self, module), fields(name = %module.name))]
    pub async fn create(&self, module: Module) -> Result<Module, DomainError> {
        info!("Registering module");
        if module.name.is_empty() {
            return Err(DomainError::validation(
                "name",
                "String should have at least 1 character",
            ));
        }

        let txn = self.db.begin().await?;
        if self.repo.find(&txn, &module.name).await?.is_some() {
            return Err(DomainError::conflict(format!(
                "A module named '{}' already exists!",
                module.name
            )));
        }
        if let Some(custom) = &module.custom_name {
            let holders = self
                .repo
                .find_by_custom_names(&txn, std::slice::from_ref(custom))
                .await?;
            if !holders.is_empty() {
                return Err(DomainError::conflict(format!(
                    "Module with custom_name = '{custom}' already exists!"
                )));
            }
        }
        self.repo.insert(&txn, &module).await?;
        txn.commit().await?;

        info!("Registered module");
        Ok(module)
    }

    /// Settings and their audit trail go with the module.
    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<(), DomainError> {
        info!("Deleting module");
        if !self.repo.delete(&self.db, name).await? {
            return Err(source_missing(name));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "modules_test.rs"]
mod modules_test;
