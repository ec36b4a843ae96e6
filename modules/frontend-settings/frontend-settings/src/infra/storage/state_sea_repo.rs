use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::domain::model::StateBlob;
use crate::domain::repos::StateRepository;

use super::entity::state::{self, Entity as StateEntity};

pub struct SeaOrmStateRepository {
    db: DatabaseConnection,
}

impl SeaOrmStateRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StateRepository for SeaOrmStateRepository {
    async fn insert(&self, blob: &StateBlob) -> anyhow::Result<()> {
        state::ActiveModel::from(blob).insert(&self.db).await?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<StateBlob>> {
        let found = StateEntity::find_by_id(id).one(&self.db).await?;
        Ok(found.map(Into::into))
    }

    async fn delete_expired_before(&self, cutoff: DateTime<Utc>) -> anyhow::Result<u64> {
        let res = StateEntity::delete_many()
            .filter(state::Column::ExpireDate.is_not_null())
            .filter(state::Column::ExpireDate.lte(cutoff))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected)
    }
}
