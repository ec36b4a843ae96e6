use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "color_range")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tmo_id: String,
    pub tprm_id: String,
    pub val_type: String,
    pub name: String,
    pub value_type: String,
    pub with_indeterminate: Option<bool>,
    pub with_cleared: Option<bool>,
    #[sea_orm(column_type = "JsonBinary")]
    pub ranges: Json,
    pub public: bool,
    pub direction: String,
    #[sea_orm(column_name = "default")]
    pub is_default: bool,
    pub created_by: String,
    pub created_by_sub: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
