use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_color_range(manager).await?;
        create_map(manager).await?;
        create_table_presets(manager).await?;
        create_modules(manager).await?;
        create_state(manager).await?;

        manager
            .create_table(
                Table::create()
                    .table(UserSettings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserSettings::User).string().not_null())
                    .col(ColumnDef::new(UserSettings::Key).string().not_null())
                    .col(ColumnDef::new(UserSettings::Settings).json_binary().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserSettings::User)
                            .col(UserSettings::Key),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            UserSettings::Table.into_iden(),
            State::Table.into_iden(),
            ModuleSettingsLogs::Table.into_iden(),
            ModuleSettings::Table.into_iden(),
            Modules::Table.into_iden(),
            TablePresets::Table.into_iden(),
            Map::Table.into_iden(),
            ColorRange::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

async fn create_color_range(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(ColorRange::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(ColorRange::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(ColumnDef::new(ColorRange::TmoId).string().not_null())
                .col(ColumnDef::new(ColorRange::TprmId).string().not_null())
                .col(
                    ColumnDef::new(ColorRange::ValType)
                        .string()
                        .not_null()
                        .default("float"),
                )
                .col(ColumnDef::new(ColorRange::Name).string().not_null())
                .col(ColumnDef::new(ColorRange::ValueType).string().not_null())
                .col(ColumnDef::new(ColorRange::WithIndeterminate).boolean())
                .col(ColumnDef::new(ColorRange::WithCleared).boolean())
                .col(ColumnDef::new(ColorRange::Ranges).json_binary().not_null())
                .col(
                    ColumnDef::new(ColorRange::Public)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .col(
                    ColumnDef::new(ColorRange::Direction)
                        .string()
                        .not_null()
                        .default("asc"),
                )
                .col(
                    ColumnDef::new(ColorRange::Default)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .col(ColumnDef::new(ColorRange::CreatedBy).string().not_null())
                .col(ColumnDef::new(ColorRange::CreatedBySub).string().not_null())
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .if_not_exists()
                .name("color_range_unique")
                .table(ColorRange::Table)
                .col(ColorRange::TmoId)
                .col(ColorRange::TprmId)
                .col(ColorRange::Name)
                .col(ColorRange::CreatedBy)
                .unique()
                .to_owned(),
        )
        .await
}

async fn create_map(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Map::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Map::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(ColumnDef::new(Map::Name).string().not_null())
                .col(ColumnDef::new(Map::Layer).string().not_null())
                .col(ColumnDef::new(Map::Attribute).string().not_null())
                .col(ColumnDef::new(Map::Range).json_binary().not_null())
                .col(ColumnDef::new(Map::CreatedBy).string().not_null())
                .col(ColumnDef::new(Map::CreatedBySub).string().not_null())
                .col(ColumnDef::new(Map::Public).boolean().not_null().default(false))
                .col(ColumnDef::new(Map::Default).boolean().not_null().default(false))
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .if_not_exists()
                .name("map_unique")
                .table(Map::Table)
                .col(Map::Name)
                .col(Map::Layer)
                .col(Map::Attribute)
                .col(Map::CreatedBy)
                .unique()
                .to_owned(),
        )
        .await
}

async fn create_table_presets(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(TablePresets::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(TablePresets::Id)
                        .integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(ColumnDef::new(TablePresets::Kind).string().not_null())
                .col(ColumnDef::new(TablePresets::TmoId).big_integer().not_null())
                .col(ColumnDef::new(TablePresets::Name).string().not_null())
                .col(ColumnDef::new(TablePresets::Value).json_binary())
                .col(ColumnDef::new(TablePresets::Order).json_binary())
                .col(ColumnDef::new(TablePresets::Pinned).json_binary())
                .col(ColumnDef::new(TablePresets::CreatedBy).string().not_null())
                .col(ColumnDef::new(TablePresets::CreatedBySub).string().not_null())
                .col(
                    ColumnDef::new(TablePresets::Public)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .col(
                    ColumnDef::new(TablePresets::Default)
                        .boolean()
                        .not_null()
                        .default(false),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .if_not_exists()
                .name("table_presets_unique")
                .table(TablePresets::Table)
                .col(TablePresets::Kind)
                .col(TablePresets::TmoId)
                .col(TablePresets::Name)
                .col(TablePresets::CreatedBySub)
                .unique()
                .to_owned(),
        )
        .await
}

async fn create_modules(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(Modules::Table)
                .if_not_exists()
                .col(ColumnDef::new(Modules::Name).string().not_null().primary_key())
                .col(ColumnDef::new(Modules::CustomName).string().unique_key())
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(ModuleSettings::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(ModuleSettings::Module)
                        .string()
                        .not_null()
                        .primary_key(),
                )
                .col(ColumnDef::new(ModuleSettings::Settings).json_binary().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_module_settings_module")
                        .from(ModuleSettings::Table, ModuleSettings::Module)
                        .to(Modules::Table, Modules::Name)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_table(
            Table::create()
                .table(ModuleSettingsLogs::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(ModuleSettingsLogs::Id)
                        .big_integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(ColumnDef::new(ModuleSettingsLogs::Domain).string().not_null())
                .col(ColumnDef::new(ModuleSettingsLogs::Variable).string().not_null())
                .col(ColumnDef::new(ModuleSettingsLogs::User).string().not_null())
                .col(
                    ColumnDef::new(ModuleSettingsLogs::ChangeTime)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(ColumnDef::new(ModuleSettingsLogs::OldValue).string())
                .col(ColumnDef::new(ModuleSettingsLogs::NewValue).string())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_module_settings_logs_domain")
                        .from(ModuleSettingsLogs::Table, ModuleSettingsLogs::Domain)
                        .to(Modules::Table, Modules::Name)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

    manager
        .create_index(
            Index::create()
                .if_not_exists()
                .name("ix_module_settings_logs_change_time")
                .table(ModuleSettingsLogs::Table)
                .col(ModuleSettingsLogs::ChangeTime)
                .to_owned(),
        )
        .await
}

async fn create_state(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    manager
        .create_table(
            Table::create()
                .table(State::Table)
                .if_not_exists()
                .col(ColumnDef::new(State::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(State::Value).json_binary().not_null())
                .col(
                    ColumnDef::new(State::CreationDate)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(ColumnDef::new(State::ExpireDate).timestamp_with_time_zone())
                .col(ColumnDef::new(State::CreatedBy).string().not_null())
                .check(
                    Expr::col(State::ExpireDate)
                        .is_null()
                        .or(Expr::col(State::ExpireDate).gte(Expr::col(State::CreationDate))),
                )
                .to_owned(),
        )
        .await
}

#[derive(DeriveIden)]
pub(super) enum ColorRange {
    Table,
    Id,
    TmoId,
    TprmId,
    ValType,
    Name,
    ValueType,
    WithIndeterminate,
    WithCleared,
    Ranges,
    Public,
    Direction,
    Default,
    CreatedBy,
    CreatedBySub,
}

#[derive(DeriveIden)]
pub(super) enum Map {
    Table,
    Id,
    Name,
    Layer,
    Attribute,
    Range,
    CreatedBy,
    CreatedBySub,
    Public,
    Default,
}

#[derive(DeriveIden)]
pub(super) enum TablePresets {
    Table,
    Id,
    Kind,
    TmoId,
    Name,
    Value,
    Order,
    Pinned,
    CreatedBy,
    CreatedBySub,
    Public,
    Default,
}

#[derive(DeriveIden)]
enum Modules {
    Table,
    Name,
    CustomName,
}

#[derive(DeriveIden)]
enum ModuleSettings {
    Table,
    Module,
    Settings,
}

#[derive(DeriveIden)]
enum ModuleSettingsLogs {
    Table,
    Id,
    Domain,
    Variable,
    User,
    ChangeTime,
    OldValue,
    NewValue,
}

#[derive(DeriveIden)]
enum State {
    Table,
    Id,
    Value,
    CreationDate,
    ExpireDate,
    CreatedBy,
}

#[derive(DeriveIden)]
enum UserSettings {
    Table,
    User,
    Key,
    Settings,
}
