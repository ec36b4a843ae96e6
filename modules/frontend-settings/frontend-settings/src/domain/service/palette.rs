use std::collections::BTreeMap;
use std::sync::Arc;

use frontend_settings_sdk::{CustomPalette, PreferenceInstance};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::{Map, Value, json};
use settings_auth::Identity;
use tracing::{info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::model::{ColorRange, Direction, NewColorRange, ValueType};
use crate::domain::repos::ColorRangesRepository;

const NUMERIC_VAL_TYPES: [&str; 3] = ["number", "float", "int"];

/// Three-tier palette; numeric parameters also get the tier thresholds.
fn default_palette(val_type: &str) -> Map<String, Value> {
    let mut palette = Map::new();
    palette.insert(
        "colors".to_owned(),
        json!([
            {"name": "Tier 1", "id": 1, "hex": "#FF0000"},
            {"name": "Tier 2", "id": 2, "hex": "#FFCC00"},
            {"name": "Tier 3", "id": 3, "hex": "#66CC33"},
        ]),
    );
    if NUMERIC_VAL_TYPES.contains(&val_type) {
        palette.insert("values".to_owned(), json!([20, 80]));
    }
    palette
}

/// The empty identity owns every record created here.
fn system_range(
    tmo_id: i64,
    kpi_id: i64,
    name: &str,
    val_type: &str,
    ranges: Map<String, Value>,
) -> Result<ColorRange, DomainError> {
    let new = NewColorRange {
        tmo_id: tmo_id.to_string(),
        tprm_id: kpi_id.to_string(),
        val_type: val_type.to_owned(),
        name: name.to_owned(),
        value_type: ValueType::General,
        with_indeterminate: Some(true),
        with_cleared: Some(true),
        ranges,
        public: true,
        is_default: false,
        direction: Direction::Asc,
    };
    new.validate()?;
    Ok(new.into_record(&Identity::system()))
}

fn parse_palette(raw: &str) -> Result<Map<String, Value>, DomainError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DomainError::validation("palette", "palette must be a JSON object")),
        Err(e) => Err(DomainError::validation("palette", e.to_string())),
    }
}

/// Provisions system color ranges for KPI parameters on behalf of other
/// services. Each item runs in its own savepoint; failed items are reported
/// back by KPI id and never roll back the others.
#[derive(Clone)]
pub struct PaletteService<R: ColorRangesRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
}

impl<R: ColorRangesRepository> PaletteService<R> {
    #[must_use]
    pub fn new(db: DatabaseConnection, repo: Arc<R>) -> Self {
        Self { db, repo }
    }

    async fn create_default<C: ConnectionTrait>(
        &self,
        conn: &C,
        tmo_id: i64,
        item: &PreferenceInstance,
    ) -> Result<(), DomainError> {
        let record = system_range(
            tmo_id,
            item.kpi_id,
            &item.preference_name,
            &item.val_type,
            default_palette(&item.val_type),
        )?;
        if self
            .repo
            .find_system(conn, &record.tmo_id, &record.tprm_id, &record.name)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict("system color range already exists"));
        }
        self.repo.insert(conn, &record).await?;
        Ok(())
    }

    async fn upsert_custom<C: ConnectionTrait>(
        &self,
        conn: &C,
        item: &CustomPalette,
    ) -> Result<(), DomainError> {
        let ranges = parse_palette(&item.palette)?;
        let record = system_range(
            item.object_type_id,
            item.kpi_id,
            &item.preference_name,
            &item.val_type,
            ranges,
        )?;
        match self
            .repo
            .find_system(conn, &record.tmo_id, &record.tprm_id, &record.name)
            .await?
        {
            Some(mut existing) => {
                existing.ranges = record.ranges;
                self.repo.update(conn, &existing).await
            }
            None => self.repo.insert(conn, &record).await.map(|_| ()),
        }
    }

    /// Returns the KPI ids that could not be provisioned.
    ///
    /// # Errors
    /// Only when the surrounding transaction cannot be opened or committed.
    #[instrument(skip(self, items), fields(object_types = items.len()))]
    pub async fn set_default_palettes(
        &self,
        items: &BTreeMap<i64, Vec<PreferenceInstance>>,
    ) -> Result<Vec<i64>, DomainError> {
        let txn = self.db.begin().await?;
        let mut wrong = Vec::new();
        for (tmo_id, instances) in items {
            for item in instances {
                let savepoint = txn.begin().await?;
                match self.create_default(&savepoint, *tmo_id, item).await {
                    Ok(()) => savepoint.commit().await?,
                    Err(e) => {
                        warn!(tmo_id, kpi_id = item.kpi_id, error = %e, "Default palette rejected");
                        savepoint.rollback().await?;
                        wrong.push(item.kpi_id);
                    }
                }
            }
        }
        txn.commit().await?;

        info!(wrong = wrong.len(), "Default palettes applied");
        Ok(wrong)
    }

    /// Returns the KPI ids whose palette was not stored.
    ///
    /// # Errors
    /// Only when the surrounding transaction cannot be opened or committed.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn set_custom_palettes(&self, items: &[CustomPalette]) -> Result<Vec<i64>, DomainError> {
        let txn = self.db.begin().await?;
        let mut wrong = Vec::new();
        for item in items {
            let savepoint = txn.begin().await?;
            match self.upsert_custom(&savepoint, item).await {
                Ok(()) => savepoint.commit().await?,
                Err(e) => {
                    warn!(kpi_id = item.kpi_id, error = %e, "Custom palette rejected");
                    savepoint.rollback().await?;
                    wrong.push(item.kpi_id);
                }
            }
        }
        txn.commit().await?;

        info!(wrong = wrong.len(), "Custom palettes applied");
        Ok(wrong)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn numeric_palettes_carry_thresholds() {
        assert_eq!(default_palette("int").get("values"), Some(&json!([20, 80])));
        assert!(default_palette("str").get("values").is_none());
        assert_eq!(default_palette("str")["colors"][2]["hex"], "#66CC33");
    }

    #[test]
    fn palette_must_be_an_object() {
        assert!(parse_palette(r#"{"colors": []}"#).is_ok());
        assert!(parse_palette("[1, 2]").is_err());
        assert!(parse_palette("{not json").is_err());
    }

    #[test]
    fn system_ranges_are_public_and_ownerless() {
        let r = system_range(5, 7, "traffic", "float", default_palette("float")).unwrap();
        assert_eq!(r.tmo_id, "5");
        assert_eq!(r.tprm_id, "7");
        assert!(r.public);
        assert!(!r.is_default);
        assert_eq!(r.created_by, "");
        assert_eq!(r.created_by_sub, "");
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(system_range(5, 7, "traffic", "float", Map::new()).is_err());
    }
}

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;
