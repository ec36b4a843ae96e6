use async_trait::async_trait;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::domain::error::DomainError;
use crate::domain::model::{LogFilter, LogSortField, ModuleSettings, SettingsLog, SortDirection};
use crate::domain::repos::ModuleSettingsRepository;
use crate::infra::storage::db::{DUPLICATE_KEY, db_err, rows_per_insert, write_err};
use crate::infra::storage::entity::{module, module_settings, settings_log};
use crate::infra::storage::mapper::settings_log_from_row;

const SETTINGS_COLUMNS: usize = 2;
const LOG_COLUMNS: usize = 6;

fn log_conditions(filter: &LogFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(names) = filter.module_names.as_ref().filter(|v| !v.is_empty()) {
        cond = cond.add(module::Column::CustomName.is_in(names.iter().map(String::as_str)));
    }
    if let Some(keys) = filter.fields_keys.as_ref().filter(|v| !v.is_empty()) {
        cond = cond.add(settings_log::Column::Variable.is_in(keys.iter().map(String::as_str)));
    }
    if let Some(from) = filter.from_date {
        cond = cond.add(settings_log::Column::ChangeTime.gte(from));
    }
    if let Some(to) = filter.to_date {
        cond = cond.add(settings_log::Column::ChangeTime.lte(to));
    }
    if let Some(users) = filter.users.as_ref().filter(|v| !v.is_empty()) {
        cond = cond.add(settings_log::Column::User.is_in(users.iter().map(String::as_str)));
    }
    if let Some(old) = filter.old_value.as_deref().filter(|v| !v.is_empty()) {
        cond = cond.add(settings_log::Column::OldValue.eq(old));
    }
    if let Some(new) = filter.new_value.as_deref().filter(|v| !v.is_empty()) {
        cond = cond.add(settings_log::Column::NewValue.eq(new));
    }
    cond
}

fn sort_column(field: LogSortField) -> SimpleExpr {
    let column = match field {
        LogSortField::Domain => return Expr::col((module::Entity, module::Column::CustomName)).into(),
        LogSortField::Variable => settings_log::Column::Variable,
        LogSortField::User => settings_log::Column::User,
        LogSortField::ChangeTime => settings_log::Column::ChangeTime,
        LogSortField::OldValue => settings_log::Column::OldValue,
        LogSortField::NewValue => settings_log::Column::NewValue,
    };
    Expr::col((settings_log::Entity, column)).into()
}

#[derive(Clone, Default)]
pub struct OrmModuleSettingsRepository;

#[async_trait]
impl ModuleSettingsRepository for OrmModuleSettingsRepository {
    async fn list<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<ModuleSettings>, DomainError> {
        let rows = module_settings::Entity::find()
            .order_by_asc(module_settings::Column::Module)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_many<C: ConnectionTrait>(
        &self,
        conn: &C,
        module_names: &[String],
    ) -> Result<Vec<ModuleSettings>, DomainError> {
        if module_names.is_empty() {
            return Ok(Vec::new());
        }
        let rows = module_settings::Entity::find()
            .filter(module_settings::Column::Module.is_in(module_names.iter().map(String::as_str)))
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert_many<C: ConnectionTrait>(
        &self,
        conn: &C,
        items: &[ModuleSettings],
    ) -> Result<(), DomainError> {
        for chunk in items.chunks(rows_per_insert(SETTINGS_COLUMNS)) {
            module_settings::Entity::insert_many(
                chunk.iter().map(module_settings::ActiveModel::from),
            )
            .exec_without_returning(conn)
            .await
            .map_err(|e| write_err(e, DUPLICATE_KEY))?;
        }
        Ok(())
    }

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        item: &ModuleSettings,
    ) -> Result<(), DomainError> {
        module_settings::ActiveModel::from(item)
            .update(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete_many<C: ConnectionTrait>(
        &self,
        conn: &C,
        module_names: &[String],
    ) -> Result<(), DomainError> {
        if module_names.is_empty() {
            return Ok(());
        }
        module_settings::Entity::delete_many()
            .filter(module_settings::Column::Module.is_in(module_names.iter().map(String::as_str)))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn insert_logs<C: ConnectionTrait>(
        &self,
        conn: &C,
        logs: &[SettingsLog],
    ) -> Result<(), DomainError> {
        for chunk in logs.chunks(rows_per_insert(LOG_COLUMNS)) {
            settings_log::Entity::insert_many(chunk.iter().map(settings_log::ActiveModel::from))
                .exec_without_returning(conn)
                .await
                .map_err(db_err)?;
        }
        Ok(())
    }

    async fn query_logs<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: &LogFilter,
    ) -> Result<(Vec<SettingsLog>, u64), DomainError> {
        let base = settings_log::Entity::find()
            .join(JoinType::InnerJoin, settings_log::Relation::Module.def())
            .filter(log_conditions(filter));

        let total = base.clone().count(conn).await.map_err(db_err)?;

        let mut query = base.select_also(module::Entity);
        for sort in &filter.sort {
            let order = match sort.direction {
                SortDirection::Asc => sea_orm::Order::Asc,
                SortDirection::Desc => sea_orm::Order::Desc,
            };
            query = query.order_by(sort_column(sort.field), order);
        }
        let rows = query
            .order_by_asc(settings_log::Column::Id)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(conn)
            .await
            .map_err(db_err)?;

        let logs = rows
            .into_iter()
            .map(|(row, module)| settings_log_from_row(row, module.and_then(|m| m.custom_name)))
            .collect();
        Ok((logs, total))
    }
}
