//! Saved process filter sets.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FilterSet::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FilterSet::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FilterSet::Name).string().not_null())
                    .col(ColumnDef::new(FilterSet::Filters).json_binary().not_null())
                    .col(ColumnDef::new(FilterSet::JoinOperator).string())
                    .col(ColumnDef::new(FilterSet::CreatedBy).string().not_null())
                    .col(ColumnDef::new(FilterSet::CreatedBySub).string().not_null())
                    .col(
                        ColumnDef::new(FilterSet::Public)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(FilterSet::TmoInfo).json_binary().not_null())
                    .col(
                        ColumnDef::new(FilterSet::Priority)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(FilterSet::Hidden)
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
                    .name("ix_filter_set_created_by_sub")
                    .table(FilterSet::Table)
                    .col(FilterSet::CreatedBySub)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FilterSet::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FilterSet {
    Table,
    Id,
    Name,
    Filters,
    JoinOperator,
    CreatedBy,
    CreatedBySub,
    Public,
    TmoInfo,
    Priority,
    Hidden,
}
