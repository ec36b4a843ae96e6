use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::error::DomainError;
use crate::domain::model::Module;
use crate::domain::repos::ModulesRepository;
use crate::infra::storage::db::{DUPLICATE_KEY, db_err, write_err};
use crate::infra::storage::entity::module::{ActiveModel as ModuleAM, Column, Entity as ModuleEntity};

#[derive(Clone, Default)]
pub struct OrmModulesRepository;

#[async_trait]
impl ModulesRepository for OrmModulesRepository {
    async fn list<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<Module>, DomainError> {
        let rows = ModuleEntity::find()
            .order_by_asc(Column::Name)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<Option<Module>, DomainError> {
        let found = ModuleEntity::find_by_id(name.to_owned())
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_many<C: ConnectionTrait>(
        &self,
        conn: &C,
        names: &[String],
    ) -> Result<Vec<Module>, DomainError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let rows = ModuleEntity::find()
            .filter(Column::Name.is_in(names.iter().map(String::as_str)))
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_custom_names<C: ConnectionTrait>(
        &self,
        conn: &C,
        custom_names: &[String],
    ) -> Result<Vec<Module>, DomainError> {
        if custom_names.is_empty() {
            return Ok(Vec::new());
        }
        let rows = ModuleEntity::find()
            .filter(Column::CustomName.is_in(custom_names.iter().map(String::as_str)))
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        module: &Module,
    ) -> Result<(), DomainError> {
        let am = ModuleAM {
            name: Set(module.name.clone()),
            custom_name: Set(module.custom_name.clone()),
        };
        am.insert(conn)
            .await
            .map_err(|e| write_err(e, DUPLICATE_KEY))?;
        Ok(())
    }

    async fn set_custom_name<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
        custom_name: Option<&str>,
    ) -> Result<(), DomainError> {
        ModuleEntity::update_many()
            .col_expr(Column::CustomName, Expr::value(custom_name.map(str::to_owned)))
            .filter(Column::Name.eq(name))
            .exec(conn)
            .await
            .map_err(|e| write_err(e, DUPLICATE_KEY))?;
        Ok(())
    }

    async fn delete<C: ConnectionTrait>(&self, conn: &C, name: &str) -> Result<bool, DomainError> {
        let res = ModuleEntity::delete_by_id(name.to_owned())
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected > 0)
    }
}
