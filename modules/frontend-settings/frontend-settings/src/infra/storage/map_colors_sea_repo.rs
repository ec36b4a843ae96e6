use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::domain::defaults::{DefaultSlotRepository, Visibility};
use crate::domain::error::DomainError;
use crate::domain::model::{MapColor, MapColorScope};
use crate::domain::repos::MapColorsRepository;
use crate::infra::storage::db::{DUPLICATE_KEY, db_err, write_err};
use crate::infra::storage::entity::map_color::{
    ActiveModel as MapColorAM, Column, Entity as MapColorEntity,
};

fn visible_to(subject: &str) -> Condition {
    Condition::any()
        .add(Column::Public.eq(true))
        .add(Column::CreatedBySub.eq(subject))
}

fn in_scope(scope: &MapColorScope) -> Condition {
    Condition::all()
        .add(Column::Layer.eq(scope.layer.as_str()))
        .add(Column::Attribute.eq(scope.attribute.as_str()))
}

#[derive(Clone, Default)]
pub struct OrmMapColorsRepository;

#[async_trait]
impl DefaultSlotRepository for OrmMapColorsRepository {
    type Scope = MapColorScope;
    type Record = MapColor;

    async fn find_default<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &MapColorScope,
        visibility: &Visibility,
    ) -> Result<Option<MapColor>, DomainError> {
        let mut cond = in_scope(scope).add(Column::IsDefault.eq(true));
        cond = match visibility {
            Visibility::Public => cond.add(Column::Public.eq(true)),
            Visibility::Private { owner } => cond
                .add(Column::Public.eq(false))
                .add(Column::CreatedBySub.eq(owner.as_str())),
        };
        let found = MapColorEntity::find()
            .filter(cond)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn demote<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &MapColor,
    ) -> Result<(), DomainError> {
        MapColorEntity::update_many()
            .col_expr(Column::IsDefault, Expr::value(false))
            .filter(Column::Id.eq(record.id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

#[async_trait]
impl MapColorsRepository for OrmMapColorsRepository {
    async fn find_visible<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
        subject: &str,
    ) -> Result<Option<MapColor>, DomainError> {
        let found = MapColorEntity::find()
            .filter(Column::Id.eq(id))
            .filter(visible_to(subject))
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_owned<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
        subject: &str,
    ) -> Result<Option<MapColor>, DomainError> {
        let found = MapColorEntity::find()
            .filter(Column::Id.eq(id))
            .filter(Column::CreatedBySub.eq(subject))
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn default_for<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &MapColorScope,
        subject: &str,
    ) -> Result<Option<MapColor>, DomainError> {
        let found = MapColorEntity::find()
            .filter(in_scope(scope))
            .filter(Column::IsDefault.eq(true))
            .filter(visible_to(subject))
            .order_by_asc(Column::Public)
            .order_by_desc(Column::Id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn attributes_with_default<C: ConnectionTrait>(
        &self,
        conn: &C,
        layer: &str,
        subject: &str,
    ) -> Result<Vec<String>, DomainError> {
        MapColorEntity::find()
            .select_only()
            .column(Column::Attribute)
            .distinct()
            .filter(Column::Layer.eq(layer))
            .filter(Column::IsDefault.eq(true))
            .filter(visible_to(subject))
            .order_by_asc(Column::Attribute)
            .into_tuple::<String>()
            .all(conn)
            .await
            .map_err(db_err)
    }

    async fn list<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &MapColorScope,
        subject: &str,
    ) -> Result<Vec<MapColor>, DomainError> {
        let rows = MapColorEntity::find()
            .filter(in_scope(scope))
            .filter(visible_to(subject))
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &MapColor,
    ) -> Result<i32, DomainError> {
        let am = MapColorAM::from(&MapColor {
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
        record: &MapColor,
    ) -> Result<(), DomainError> {
        MapColorAM::from(record)
            .update(conn)
            .await
            .map_err(|e| write_err(e, DUPLICATE_KEY))?;
        Ok(())
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<(), DomainError> {
        MapColorEntity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
