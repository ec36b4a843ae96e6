use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::domain::error::DomainError;
use crate::domain::model::FilterSet;
use crate::domain::repos::FilterSetsRepository;
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::filter_set::{
    ActiveModel as FilterSetAM, Column, Entity as FilterSetEntity, Model,
};

fn visible_to(subject: &str) -> Condition {
    Condition::any()
        .add(Column::Public.eq(true))
        .add(Column::CreatedBySub.eq(subject))
}

fn into_records(rows: Vec<Model>) -> Result<Vec<FilterSet>, DomainError> {
    rows.into_iter().map(FilterSet::try_from).collect()
}

/// Names are unique per visibility only by the service's checks; the table
/// carries no unique index.
#[derive(Clone, Default)]
pub struct OrmFilterSetsRepository;

#[async_trait]
impl FilterSetsRepository for OrmFilterSetsRepository {
    async fn find_visible<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i32,
        subject: &str,
    ) -> Result<Option<FilterSet>, DomainError> {
        FilterSetEntity::find()
            .filter(Column::Id.eq(id))
            .filter(visible_to(subject))
            .one(conn)
            .await
            .map_err(db_err)?
            .map(FilterSet::try_from)
            .transpose()
    }

    async fn find_owned<C: ConnectionTrait>(
        &self,
        conn: &C,
        ids: &[i32],
        subject: &str,
    ) -> Result<Vec<FilterSet>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = FilterSetEntity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .filter(Column::CreatedBySub.eq(subject))
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        into_records(rows)
    }

    async fn visible_named<C: ConnectionTrait>(
        &self,
        conn: &C,
        names: &[String],
        subject: &str,
        exclude_ids: &[i32],
    ) -> Result<Vec<FilterSet>, DomainError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let mut query = FilterSetEntity::find()
            .filter(Column::Name.is_in(names.iter().cloned()))
            .filter(visible_to(subject));
        if !exclude_ids.is_empty() {
            query = query.filter(Column::Id.is_not_in(exclude_ids.iter().copied()));
        }
        let rows = query
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        into_records(rows)
    }

    async fn list_visible<C: ConnectionTrait>(
        &self,
        conn: &C,
        subject: &str,
    ) -> Result<Vec<FilterSet>, DomainError> {
        let own = FilterSetEntity::find()
            .filter(Column::CreatedBySub.eq(subject))
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        let public = FilterSetEntity::find()
            .filter(Column::Public.eq(true))
            .filter(Column::CreatedBySub.ne(subject))
            .order_by_asc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        into_records(own.into_iter().chain(public).collect())
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &FilterSet,
    ) -> Result<FilterSet, DomainError> {
        let saved = FilterSetAM::from(&FilterSet {
            id: 0,
            ..record.clone()
        })
        .insert(conn)
        .await
        .map_err(db_err)?;
        FilterSet::try_from(saved)
    }

    async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &FilterSet,
    ) -> Result<(), DomainError> {
        FilterSetAM::from(record)
            .update(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, id: i32) -> Result<(), DomainError> {
        FilterSetEntity::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
