use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::domain::model::UserSettings;
use crate::domain::repos::UserSettingsRepository;

use super::entity::user_settings::{self, Column, Entity as UserSettingsEntity};

pub struct SeaOrmUserSettingsRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserSettingsRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserSettingsRepository for SeaOrmUserSettingsRepository {
    async fn list_keys(&self, user: &str) -> anyhow::Result<Vec<String>> {
        let keys = UserSettingsEntity::find()
            .select_only()
            .column(Column::Key)
            .filter(Column::User.eq(user))
            .order_by_asc(Column::Key)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;
        Ok(keys)
    }

    async fn find(&self, user: &str, key: &str) -> anyhow::Result<Option<UserSettings>> {
        let found = UserSettingsEntity::find_by_id((user.to_owned(), key.to_owned()))
            .one(&self.db)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, settings: &UserSettings) -> anyhow::Result<()> {
        user_settings::ActiveModel::from(settings)
            .insert(&self.db)
            .await?;
        Ok(())
    }

    async fn update(&self, settings: &UserSettings) -> anyhow::Result<bool> {
        let res = UserSettingsEntity::update_many()
            .col_expr(Column::Settings, Expr::value(settings.settings.clone()))
            .filter(Column::User.eq(settings.user.as_str()))
            .filter(Column::Key.eq(settings.key.as_str()))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, user: &str, key: &str) -> anyhow::Result<bool> {
        let res = UserSettingsEntity::delete_by_id((user.to_owned(), key.to_owned()))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }
}
