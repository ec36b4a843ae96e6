use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::domain::model::color_range::DEFAULT_VAL_TYPE;
use crate::domain::model::{
    ColorRange, ColorRangeFilter, ColorRangePatch, DefaultsQuery, Direction, NewColorRange,
    ValueType,
};

fn default_val_type() -> String {
    DEFAULT_VAL_TYPE.to_owned()
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ColorRangeCreateReq {
    #[serde(rename = "tmoId", alias = "tmo_id")]
    pub tmo_id: String,
    #[serde(rename = "tprmId", alias = "tprm_id")]
    pub tprm_id: String,
    #[serde(rename = "valType", alias = "val_type", default = "default_val_type")]
    pub val_type: String,
    pub name: String,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub default: Option<bool>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(rename = "withIndeterminate", alias = "with_indeterminate", default)]
    pub with_indeterminate: Option<bool>,
    #[serde(rename = "withCleared", alias = "with_cleared", default)]
    pub with_cleared: Option<bool>,
    pub value_type: ValueType,
    #[schema(value_type = Object)]
    pub ranges: Map<String, Value>,
}

impl From<ColorRangeCreateReq> for NewColorRange {
    fn from(req: ColorRangeCreateReq) -> Self {
        Self {
            tmo_id: req.tmo_id,
            tprm_id: req.tprm_id,
            val_type: req.val_type,
            name: req.name,
            value_type: req.value_type,
            with_indeterminate: req.with_indeterminate,
            with_cleared: req.with_cleared,
            ranges: req.ranges,
            public: req.public.unwrap_or(false),
            is_default: req.default.unwrap_or(false),
            direction: req.direction,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ColorRangePatchReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "valType", alias = "val_type", default)]
    pub val_type: Option<String>,
    #[serde(default)]
    pub value_type: Option<ValueType>,
    #[serde(rename = "withIndeterminate", alias = "with_indeterminate", default)]
    pub with_indeterminate: Option<bool>,
    #[serde(rename = "withCleared", alias = "with_cleared", default)]
    pub with_cleared: Option<bool>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub ranges: Option<Map<String, Value>>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub default: Option<bool>,
}

impl From<ColorRangePatchReq> for ColorRangePatch {
    fn from(req: ColorRangePatchReq) -> Self {
        Self {
            name: req.name,
            val_type: req.val_type,
            value_type: req.value_type,
            with_indeterminate: req.with_indeterminate,
            with_cleared: req.with_cleared,
            direction: req.direction,
            ranges: req.ranges,
            public: req.public,
            is_default: req.default,
        }
    }
}

fn default_limit() -> u64 {
    10
}

fn yes() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ColorRangeFilterReq {
    #[serde(default)]
    pub ids: Option<Vec<i32>>,
    #[serde(default)]
    pub tmo_ids: Option<Vec<String>>,
    #[serde(default)]
    pub tprm_ids: Option<Vec<String>>,
    #[serde(default)]
    pub val_types: Option<Vec<String>>,
    #[serde(default)]
    pub is_default: Option<bool>,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default = "yes")]
    pub only_description: bool,
}

impl ColorRangeFilterReq {
    #[must_use]
    pub fn to_filter(&self) -> ColorRangeFilter {
        ColorRangeFilter {
            ids: self.ids.clone().unwrap_or_default(),
            tmo_ids: self.tmo_ids.clone().unwrap_or_default(),
            tprm_ids: self.tprm_ids.clone().unwrap_or_default(),
            val_types: self.val_types.clone(),
            is_default: self.is_default,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DefaultsParams {
    pub tmo_id: Option<String>,
    pub tprm_id: Option<String>,
    pub val_type: Option<String>,
}

impl From<DefaultsParams> for DefaultsQuery {
    fn from(p: DefaultsParams) -> Self {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        Self {
            tmo_id: non_empty(p.tmo_id),
            tprm_id: non_empty(p.tprm_id),
            val_type: non_empty(p.val_type),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColorRangeDto {
    pub id: i32,
    #[serde(rename = "tmoId")]
    pub tmo_id: String,
    #[serde(rename = "tprmId")]
    pub tprm_id: String,
    #[serde(rename = "valType")]
    pub val_type: String,
    pub name: String,
    pub public: bool,
    pub default: bool,
    pub direction: Direction,
    #[serde(rename = "withIndeterminate")]
    pub with_indeterminate: Option<bool>,
    #[serde(rename = "withCleared")]
    pub with_cleared: Option<bool>,
    pub value_type: ValueType,
    pub ranges: Value,
    pub created_by: String,
    pub created_by_sub: String,
}

impl From<ColorRange> for ColorRangeDto {
    fn from(r: ColorRange) -> Self {
        Self {
            id: r.id,
            tmo_id: r.tmo_id,
            tprm_id: r.tprm_id,
            val_type: r.val_type,
            name: r.name,
            public: r.public,
            default: r.is_default,
            direction: r.direction,
            with_indeterminate: r.with_indeterminate,
            with_cleared: r.with_cleared,
            value_type: r.value_type,
            ranges: r.ranges,
            created_by: r.created_by,
            created_by_sub: r.created_by_sub,
        }
    }
}

/// Filter row without the payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ColorRangeSummaryDto {
    pub id: i32,
    #[serde(rename = "tmoId")]
    pub tmo_id: String,
    #[serde(rename = "tprmId")]
    pub tprm_id: String,
    #[serde(rename = "valType")]
    pub val_type: String,
    pub name: String,
    pub public: bool,
    pub default: bool,
    pub direction: Direction,
    pub created_by: String,
    pub created_by_sub: String,
}

impl From<ColorRange> for ColorRangeSummaryDto {
    fn from(r: ColorRange) -> Self {
        Self {
            id: r.id,
            tmo_id: r.tmo_id,
            tprm_id: r.tprm_id,
            val_type: r.val_type,
            name: r.name,
            public: r.public,
            default: r.is_default,
            direction: r.direction,
            created_by: r.created_by,
            created_by_sub: r.created_by_sub,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ColorRangeView {
    Full(ColorRangeDto),
    Summary(ColorRangeSummaryDto),
}

impl ColorRangeView {
    #[must_use]
    pub fn new(record: ColorRange, only_description: bool) -> Self {
        if only_description {
            Self::Summary(record.into())
        } else {
            Self::Full(record.into())
        }
    }
}
