use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "filter_set")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub filters: Json,
    pub join_operator: Option<String>,
    pub created_by: String,
    pub created_by_sub: String,
    pub public: bool,
    #[sea_orm(column_type = "JsonBinary")]
    pub tmo_info: Json,
    pub priority: i32,
    pub hidden: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
