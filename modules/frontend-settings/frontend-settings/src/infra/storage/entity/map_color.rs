use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "map")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub layer: String,
    pub attribute: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub range: Json,
    pub created_by: String,
    pub created_by_sub: String,
    pub public: bool,
    #[sea_orm(column_name = "default")]
    pub is_default: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
