use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::domain::model::{MapColor, MapColorScope, MapColorUpdate, NewMapColor};

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MapScopeParams {
    pub layer: String,
    pub attribute: String,
}

impl From<MapScopeParams> for MapColorScope {
    fn from(p: MapScopeParams) -> Self {
        Self {
            layer: p.layer,
            attribute: p.attribute,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LayerParams {
    pub layer: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MapColorCreateReq {
    pub name: String,
    pub layer: String,
    pub attribute: String,
    #[schema(value_type = Object)]
    pub range: Map<String, Value>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub default: Option<bool>,
}

impl From<MapColorCreateReq> for NewMapColor {
    fn from(req: MapColorCreateReq) -> Self {
        Self {
            name: req.name,
            layer: req.layer,
            attribute: req.attribute,
            range: req.range,
            public: req.public.unwrap_or(false),
            is_default: req.default.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MapColorUpdateReq {
    pub name: String,
    #[schema(value_type = Object)]
    pub range: Map<String, Value>,
    pub public: bool,
    pub default: bool,
}

impl From<MapColorUpdateReq> for MapColorUpdate {
    fn from(req: MapColorUpdateReq) -> Self {
        Self {
            name: req.name,
            range: req.range,
            public: req.public,
            is_default: req.default,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapColorDto {
    pub id: i32,
    pub name: String,
    pub range: Value,
    pub public: bool,
    pub default: bool,
    pub created_by: String,
}

impl From<MapColor> for MapColorDto {
    fn from(r: MapColor) -> Self {
        Self {
            id: r.id,
            name: r.name,
            range: r.range,
            public: r.public,
            default: r.is_default,
            created_by: r.created_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MapColorSummaryDto {
    pub id: i32,
    pub name: String,
    pub public: bool,
    pub default: bool,
    pub created_by: String,
}

impl From<MapColor> for MapColorSummaryDto {
    fn from(r: MapColor) -> Self {
        Self {
            id: r.id,
            name: r.name,
            public: r.public,
            default: r.is_default,
            created_by: r.created_by,
        }
    }
}
