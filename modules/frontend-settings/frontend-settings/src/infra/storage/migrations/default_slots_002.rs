//! Partial unique indexes backing the default slots: one public default per
//! scope, one private default per scope and owner.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SLOT_INDEXES: &[(&str, &str, &str)] = &[
    ("color_range", "color_range", "tmo_id, tprm_id, val_type"),
    ("map", "map", "layer, attribute"),
    ("table_presets", "table_presets", "kind, tmo_id"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        for (prefix, table, scope) in SLOT_INDEXES {
            conn.execute_unprepared(&format!(
                r#"CREATE UNIQUE INDEX IF NOT EXISTS ux_{prefix}_public_default ON {table} ({scope}) WHERE "default" AND public"#
            ))
            .await?;
            conn.execute_unprepared(&format!(
                r#"CREATE UNIQUE INDEX IF NOT EXISTS ux_{prefix}_private_default ON {table} ({scope}, created_by_sub) WHERE "default" AND NOT public"#
            ))
            .await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();
        for (prefix, _, _) in SLOT_INDEXES {
            for visibility in ["public", "private"] {
                conn.execute_unprepared(&format!(
                    "DROP INDEX IF EXISTS ux_{prefix}_{visibility}_default"
                ))
                .await?;
            }
        }
        Ok(())
    }
}
