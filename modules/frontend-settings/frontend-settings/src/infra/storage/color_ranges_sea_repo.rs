use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::domain::defaults::{DefaultSlotRepository, Visibility};
use crate::domain::error::DomainError;
use crate::domain::model::{ColorRange, ColorRangeFilter, ColorRangeScope, DefaultsQuery};
use crate::domain::repos::ColorRangesRepository;
use crate::infra::storage::db::{DUPLICATE_KEY, db_err, write_err};
use crate::infra::storage::entity::color_range::{
    ActiveModel as ColorRangeAM, Column, Entity as ColorRangeEntity, Model,
};

fn visible_to(subject: &str) -> Condition {
    Condition::any()
        .add(Column::Public.eq(true))
        .add(Column::CreatedBySub.eq(subject))
}

fn in_slot(scope: &ColorRangeScope, visibility: &Visibility) -> Condition {
    let cond = Condition::all()
        .add(Column::TmoId.eq(scope.tmo_id.as_str()))
        .add(Column::TprmId.eq(scope.tprm_id.as_str()))
        .add(Column::ValType.eq(scope.val_type.as_str()))
        .add(Column::IsDefault.eq(true));
    match visibility {
        Visibility::Public => cond.add(Column::Public.eq(true)),
        Visibility::Private { owner } => cond
            .add(Column::Public.eq(false))
            .add(Column::CreatedBySub.eq(owner.as_str())),
    }
}

fn into_records(rows: Vec<Model>) -> Result<Vec<ColorRange>, DomainError> {
    rows.into_iter().map(ColorRange::try_from).collect()
}

/// ORM-based implementation of [`ColorRangesRepository`].
#[derive(Clone, Default)]
pub struct OrmColorRangesRepository;

#[async_trait]
impl DefaultSlotRepository for OrmColorRangesRepository {
    type Scope = ColorRangeScope;
    type Record = ColorRange;

    async fn find_default<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &ColorRangeScope,
        visibility: &Visibility,
    ) -> Result<Option<ColorRange>, DomainError> {
        ColorRangeEntity::find()
            .filter(in_slot(scope, visibility))
            .one(conn)
            .await
            .map_err(db_err)?
            .map(ColorRange::try_from)
            .transpose()
    }

    async fn demote<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &ColorRange,
    ) -> Result<(), DomainError> {
        ColorRangeEntity::update_many()
            .col_expr(Column::IsDefault, Expr::value(false))
            .filter(Column::Id.eq(record.id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

#[async_trait]
impl ColorRangesRepository for OrmColorRangesRepository {
    async fn find_visible<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
        subject: &str,
    ) -> Result<Option<ColorRange>, DomainError> {
        ColorRangeEntity::find()
            .filter(Column::Id.eq(id))
            .filter(visible_to(subject))
            .one(conn)
            .await
            .map_err(db_err)?
            .map(ColorRange::try_from)
            .transpose()
    }

    async fn find_system<C: ConnectionTrait>(
        &self,
        conn: &C,
        tmo_id: &str,
        tprm_id: &str,
        name: &str,
    ) -> Result<Option<ColorRange>, DomainError> {
        ColorRangeEntity::find()
            .filter(Column::TmoId.eq(tmo_id))
            .filter(Column::TprmId.eq(tprm_id))
            .filter(Column::Name.eq(name))
            .filter(Column::CreatedBy.eq(""))
            .one(conn)
            .await
            .map_err(db_err)?
            .map(ColorRange::try_from)
            .transpose()
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &ColorRange,
    ) -> Result<i32, DomainError> {
        let am = ColorRangeAM::from(&ColorRange {
            id: 0,
            ..record.clone()
        });
        let saved = am
            .insert(conn)
            .await
            .map_err(|e| write_err(e, DUPLICATE_KEY))?;
        Ok(saved.id)
    }

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &ColorRange,
    ) -> Result<(), DomainError> {
        ColorRangeAM::from(record)
            .update(conn)
            .await
            .map_err(|e| write_err(e, DUPLICATE_KEY))?;
        Ok(())
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<(), DomainError> {
        ColorRangeEntity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn filter<C: ConnectionTrait>(
        &self,
        conn: &C,
        filter: &ColorRangeFilter,
        subject: &str,
    ) -> Result<Vec<ColorRange>, DomainError> {
        if filter.val_types.as_ref().is_some_and(Vec::is_empty) {
            return Ok(Vec::new());
        }

        let mut cond = Condition::all().add(visible_to(subject));
        if !filter.ids.is_empty() {
            cond = cond.add(Column::Id.is_in(filter.ids.iter().copied()));
        }
        if !filter.tmo_ids.is_empty() {
            cond = cond.add(Column::TmoId.is_in(filter.tmo_ids.iter().map(String::as_str)));
        }
        if !filter.tprm_ids.is_empty() {
            cond = cond.add(Column::TprmId.is_in(filter.tprm_ids.iter().map(String::as_str)));
        }
        if let Some(val_types) = &filter.val_types {
            cond = cond.add(Column::ValType.is_in(val_types.iter().map(String::as_str)));
        }
        if let Some(is_default) = filter.is_default {
            cond = cond.add(Column::IsDefault.eq(is_default));
        }

        let rows = ColorRangeEntity::find()
            .filter(cond)
            .order_by_asc(Column::Id)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(conn)
            .await
            .map_err(db_err)?;
        into_records(rows)
    }

    async fn defaults<C: ConnectionTrait>(
        &self,
        conn: &C,
        query: &DefaultsQuery,
        subject: &str,
    ) -> Result<Vec<ColorRange>, DomainError> {
        let mut cond = Condition::all()
            .add(Column::IsDefault.eq(true))
            .add(visible_to(subject));
        if let Some(tmo_id) = &query.tmo_id {
            cond = cond.add(Column::TmoId.eq(tmo_id.as_str()));
        }
        if let Some(tprm_id) = &query.tprm_id {
            cond = cond.add(Column::TprmId.eq(tprm_id.as_str()));
        }
        if let Some(val_type) = &query.val_type {
            cond = cond.add(Column::ValType.eq(val_type.as_str()));
        }

        let rows = ColorRangeEntity::find()
            .filter(cond)
            .order_by_asc(Column::TprmId)
            .order_by_asc(Column::Public)
            .order_by_desc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        into_records(rows)
    }
}
