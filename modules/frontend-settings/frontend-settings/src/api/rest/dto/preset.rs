use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::domain::model::{Preset, PresetInput};

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TmoParams {
    pub tmo_id: i64,
}

/// Body of preset create and replace. `order` and `pinned` are only stored
/// for column presets.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PresetReq {
    pub name: String,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Map<String, Value>>,
    pub public: bool,
    pub default: bool,
    #[serde(default)]
    pub order: Option<Vec<Value>>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub pinned: Option<Map<String, Value>>,
}

impl From<PresetReq> for PresetInput {
    fn from(req: PresetReq) -> Self {
        Self {
            name: req.name,
            value: req.value.map(Value::Object),
            public: req.public,
            is_default: req.default,
            order: req.order.map(Value::Array),
            pinned: req.pinned.map(Value::Object),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PresetDto {
    pub id: i32,
    pub tmo_id: i64,
    pub name: String,
    pub value: Option<Value>,
    pub public: bool,
    pub default: bool,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<Value>,
}

impl From<Preset> for PresetDto {
    fn from(p: Preset) -> Self {
        Self {
            id: p.id,
            tmo_id: p.tmo_id,
            name: p.name,
            value: p.value,
            public: p.public,
            default: p.is_default,
            created_by: p.created_by,
            order: p.order,
            pinned: p.pinned,
        }
    }
}

/// List row: everything but `value`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PresetSummaryDto {
    pub id: i32,
    pub tmo_id: i64,
    pub name: String,
    pub public: bool,
    pub default: bool,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<Value>,
}

impl From<Preset> for PresetSummaryDto {
    fn from(p: Preset) -> Self {
        Self {
            id: p.id,
            tmo_id: p.tmo_id,
            name: p.name,
            public: p.public,
            default: p.is_default,
            created_by: p.created_by,
            order: p.order,
            pinned: p.pinned,
        }
    }
}
