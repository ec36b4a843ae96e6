use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "table_presets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub kind: String,
    pub tmo_id: i64,
    pub name: String,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub value: Option<Json>,
    #[sea_orm(column_name = "order", column_type = "JsonBinary", nullable)]
    pub layout_order: Option<Json>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub pinned: Option<Json>,
    pub created_by: String,
    pub created_by_sub: String,
    pub public: bool,
    #[sea_orm(column_name = "default")]
    pub is_default: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
