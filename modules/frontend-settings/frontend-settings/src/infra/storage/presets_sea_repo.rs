use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::domain::defaults::{DefaultSlotRepository, Visibility};
use crate::domain::error::DomainError;
use crate::domain::model::{Preset, PresetKind, PresetScope};
use crate::domain::repos::PresetsRepository;
use crate::infra::storage::db::{db_err, write_err};
use crate::infra::storage::entity::table_preset::{
    ActiveModel as PresetAM, Column, Entity as PresetEntity, Model,
};

fn visible_to(subject: &str) -> Condition {
    Condition::any()
        .add(Column::Public.eq(true))
        .add(Column::CreatedBySub.eq(subject))
}

fn in_scope(scope: &PresetScope) -> Condition {
    Condition::all()
        .add(Column::Kind.eq(scope.kind.as_str()))
        .add(Column::TmoId.eq(scope.tmo_id))
}

fn duplicate_name(name: &str) -> String {
    format!("Name [{name}] already exists")
}

fn into_records(rows: Vec<Model>) -> Result<Vec<Preset>, DomainError> {
    rows.into_iter().map(Preset::try_from).collect()
}

/// Columns, filters and object params share one table keyed by `kind`.
#[derive(Clone, Default)]
pub struct OrmPresetsRepository;

#[async_trait]
impl DefaultSlotRepository for OrmPresetsRepository {
    type Scope = PresetScope;
    type Record = Preset;

    async fn find_default<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &PresetScope,
        visibility: &Visibility,
    ) -> Result<Option<Preset>, DomainError> {
        let mut cond = in_scope(scope).add(Column::IsDefault.eq(true));
        cond = match visibility {
            Visibility::Public => cond.add(Column::Public.eq(true)),
            Visibility::Private { owner } => cond
                .add(Column::Public.eq(false))
                .add(Column::CreatedBySub.eq(owner.as_str())),
        };
        PresetEntity::find()
            .filter(cond)
            .one(conn)
            .await
            .map_err(db_err)?
            .map(Preset::try_from)
            .transpose()
    }

    async fn demote<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &Preset,
    ) -> Result<(), DomainError> {
        PresetEntity::update_many()
            .col_expr(Column::IsDefault, Expr::value(false))
            .filter(Column::Id.eq(record.id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

#[async_trait]
impl PresetsRepository for OrmPresetsRepository {
    async fn find_visible<C: ConnectionTrait>(
        &self,
        conn: &C,
        kind: PresetKind,
        id: i32,
        subject: &str,
    ) -> Result<Option<Preset>, DomainError> {
        PresetEntity::find()
            .filter(Column::Id.eq(id))
            .filter(Column::Kind.eq(kind.as_str()))
            .filter(visible_to(subject))
            .one(conn)
            .await
            .map_err(db_err)?
            .map(Preset::try_from)
            .transpose()
    }

    async fn default_for<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &PresetScope,
        subject: &str,
    ) -> Result<Option<Preset>, DomainError> {
        PresetEntity::find()
            .filter(in_scope(scope))
            .filter(Column::IsDefault.eq(true))
            .filter(visible_to(subject))
            .order_by_asc(Column::Public)
            .order_by_desc(Column::Id)
            .one(conn)
            .await
            .map_err(db_err)?
            .map(Preset::try_from)
            .transpose()
    }

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &PresetScope,
        subject: &str,
    ) -> Result<Vec<Preset>, DomainError> {
        let rows = PresetEntity::find()
            .filter(in_scope(scope))
            .filter(visible_to(subject))
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        into_records(rows)
    }

    async fn list_owned<C: ConnectionTrait>(
        &self,
        conn: &C,
        kind: PresetKind,
        subject: &str,
    ) -> Result<Vec<Preset>, DomainError> {
        let rows = PresetEntity::find()
            .filter(Column::Kind.eq(kind.as_str()))
            .filter(Column::CreatedBySub.eq(subject))
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        into_records(rows)
    }

    async fn list_public_except<C: ConnectionTrait>(
        &self,
        conn: &C,
        kind: PresetKind,
        exclude_tmo_ids: &[i64],
    ) -> Result<Vec<Preset>, DomainError> {
        let mut query = PresetEntity::find()
            .filter(Column::Kind.eq(kind.as_str()))
            .filter(Column::Public.eq(true));
        if !exclude_tmo_ids.is_empty() {
            query = query.filter(Column::TmoId.is_not_in(exclude_tmo_ids.iter().copied()));
        }
        let rows = query
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        into_records(rows)
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &Preset,
    ) -> Result<i32, DomainError> {
        let am = PresetAM::from(&Preset {
            id: 0,
            ..record.clone()
        });
        let saved = am
            .insert(conn)
            .await
            .map_err(|e| write_err(e, &duplicate_name(&record.name)))?;
        Ok(saved.id)
    }

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &Preset,
    ) -> Result<(), DomainError> {
        PresetAM::from(record)
            .update(conn)
            .await
            .map_err(|e| write_err(e, &duplicate_name(&record.name)))?;
        Ok(())
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<(), DomainError> {
        PresetEntity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
