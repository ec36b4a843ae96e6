use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::model::{FilterSet, FilterSetInput, FilterSetPatch, JoinOperator};

/// Keeps an explicit `null` apart from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Body of filter set create and replace.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FilterSetReq {
    pub name: String,
    #[schema(value_type = Object)]
    pub filters: Value,
    #[serde(default)]
    pub public: Option<bool>,
    pub join_operator: Option<JoinOperator>,
    #[schema(value_type = Object)]
    pub tmo_info: Map<String, Value>,
    pub priority: i32,
    #[serde(default)]
    pub hidden: Option<bool>,
}

impl From<FilterSetReq> for FilterSetInput {
    fn from(req: FilterSetReq) -> Self {
        Self {
            name: req.name,
            filters: req.filters,
            join_operator: req.join_operator,
            public: req.public.unwrap_or(false),
            tmo_info: req.tmo_info,
            priority: req.priority,
            hidden: req.hidden.unwrap_or(false),
        }
    }
}

/// One element of `PATCH /process/filterSet`; absent fields stay as stored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FilterSetPatchReq {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub filters: Option<Value>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<JoinOperator>)]
    pub join_operator: Option<Option<JoinOperator>>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub tmo_info: Option<Map<String, Value>>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub hidden: Option<bool>,
}

impl From<FilterSetPatchReq> for FilterSetPatch {
    fn from(req: FilterSetPatchReq) -> Self {
        Self {
            id: req.id,
            name: req.name,
            filters: req.filters,
            join_operator: req.join_operator,
            public: req.public,
            tmo_info: req.tmo_info,
            priority: req.priority,
            hidden: req.hidden,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FilterSetDto {
    pub id: i32,
    pub name: String,
    #[schema(value_type = Object)]
    pub filters: Value,
    pub public: bool,
    pub join_operator: Option<JoinOperator>,
    #[schema(value_type = Object)]
    pub tmo_info: Map<String, Value>,
    pub priority: i32,
    pub hidden: bool,
    pub created_by: String,
}

impl From<FilterSet> for FilterSetDto {
    fn from(s: FilterSet) -> Self {
        Self {
            id: s.id,
            name: s.name,
            filters: s.filters,
            public: s.public,
            join_operator: s.join_operator,
            tmo_info: s.tmo_info,
            priority: s.priority,
            hidden: s.hidden,
            created_by: s.created_by,
        }
    }
}

/// List row: the set plus whether the caller owns it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FilterSetListDto {
    #[serde(flatten)]
    pub set: FilterSetDto,
    pub owner: bool,
}

impl FilterSetListDto {
    #[must_use]
    pub fn for_caller(set: FilterSet, subject: &str) -> Self {
        let owner = set.created_by_sub == subject;
        Self {
            set: set.into(),
            owner,
        }
    }
}
