use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use settings_auth::Identity;
use utoipa::ToSchema;

use super::require_non_empty;
use crate::domain::error::DomainError;

pub const DEFAULT_VAL_TYPE: &str = "float";
pub const EMPTY_RANGES: &str = "value must contain at least one element";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ValueType {
    General,
    Percent,
    Hex,
    Line,
}

impl ValueType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Percent => "Percent",
            Self::Hex => "Hex",
            Self::Line => "Line",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "General" => Some(Self::General),
            "Percent" => Some(Self::Percent),
            "Hex" => Some(Self::Hex),
            "Line" => Some(Self::Line),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Default slot key of a color range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRangeScope {
    pub tmo_id: String,
    pub tprm_id: String,
    pub val_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorRange {
    pub id: i32,
    pub tmo_id: String,
    pub tprm_id: String,
    pub val_type: String,
    pub name: String,
    pub value_type: ValueType,
    pub with_indeterminate: Option<bool>,
    pub with_cleared: Option<bool>,
    pub ranges: Value,
    pub public: bool,
    pub is_default: bool,
    pub direction: Direction,
    pub created_by: String,
    pub created_by_sub: String,
}

impl ColorRange {
    #[must_use]
    pub fn scope(&self) -> ColorRangeScope {
        ColorRangeScope {
            tmo_id: self.tmo_id.clone(),
            tprm_id: self.tprm_id.clone(),
            val_type: self.val_type.clone(),
        }
    }

    /// Overwrites the fields set in `patch`.
    pub fn apply(&mut self, patch: ColorRangePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(val_type) = patch.val_type {
            self.val_type = val_type;
        }
        if let Some(value_type) = patch.value_type {
            self.value_type = value_type;
        }
        if patch.with_indeterminate.is_some() {
            self.with_indeterminate = patch.with_indeterminate;
        }
        if patch.with_cleared.is_some() {
            self.with_cleared = patch.with_cleared;
        }
        if let Some(direction) = patch.direction {
            self.direction = direction;
        }
        if let Some(ranges) = patch.ranges {
            self.ranges = Value::Object(ranges);
        }
        if let Some(public) = patch.public {
            self.public = public;
        }
        if let Some(is_default) = patch.is_default {
            self.is_default = is_default;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewColorRange {
    pub tmo_id: String,
    pub tprm_id: String,
    pub val_type: String,
    pub name: String,
    pub value_type: ValueType,
    pub with_indeterminate: Option<bool>,
    pub with_cleared: Option<bool>,
    pub ranges: Map<String, Value>,
    pub public: bool,
    pub is_default: bool,
    pub direction: Direction,
}

impl NewColorRange {
    /// # Errors
    /// `Validation` for empty keys, names or ranges.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("tmoId", &self.tmo_id)?;
        require_non_empty("tprmId", &self.tprm_id)?;
        require_non_empty("valType", &self.val_type)?;
        require_non_empty("name", &self.name)?;
        if self.ranges.is_empty() {
            return Err(DomainError::validation("ranges", EMPTY_RANGES));
        }
        Ok(())
    }

    #[must_use]
    pub fn scope(&self) -> ColorRangeScope {
        ColorRangeScope {
            tmo_id: self.tmo_id.clone(),
            tprm_id: self.tprm_id.clone(),
            val_type: self.val_type.clone(),
        }
    }

    #[must_use]
    pub fn into_record(self, owner: &Identity) -> ColorRange {
        ColorRange {
            id: 0,
            tmo_id: self.tmo_id,
            tprm_id: self.tprm_id,
            val_type: self.val_type,
            name: self.name,
            value_type: self.value_type,
            with_indeterminate: self.with_indeterminate,
            with_cleared: self.with_cleared,
            ranges: Value::Object(self.ranges),
            public: self.public,
            is_default: self.is_default,
            direction: self.direction,
            created_by: owner.name.clone(),
            created_by_sub: owner.subject.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColorRangePatch {
    pub name: Option<String>,
    pub val_type: Option<String>,
    pub value_type: Option<ValueType>,
    pub with_indeterminate: Option<bool>,
    pub with_cleared: Option<bool>,
    pub direction: Option<Direction>,
    pub ranges: Option<Map<String, Value>>,
    pub public: Option<bool>,
    pub is_default: Option<bool>,
}

impl ColorRangePatch {
    /// # Errors
    /// `Validation` when a provided field is empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(val_type) = &self.val_type {
            require_non_empty("valType", val_type)?;
        }
        if self.ranges.as_ref().is_some_and(Map::is_empty) {
            return Err(DomainError::validation("ranges", EMPTY_RANGES));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColorRangeFilter {
    pub ids: Vec<i32>,
    pub tmo_ids: Vec<String>,
    pub tprm_ids: Vec<String>,
    pub val_types: Option<Vec<String>>,
    pub is_default: Option<bool>,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone, Default)]
pub struct DefaultsQuery {
    pub tmo_id: Option<String>,
    pub tprm_id: Option<String>,
    pub val_type: Option<String>,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ColorRange {
        NewColorRange {
            tmo_id: "1".to_owned(),
            tprm_id: "2".to_owned(),
            val_type: DEFAULT_VAL_TYPE.to_owned(),
            name: "traffic".to_owned(),
            value_type: ValueType::General,
            with_indeterminate: None,
            with_cleared: Some(true),
            ranges: json!({"colors": []}).as_object().cloned().unwrap(),
            public: true,
            is_default: true,
            direction: Direction::Asc,
        }
        .into_record(&Identity::anonymous("__admin"))
    }

    #[test]
    fn patch_touches_only_set_fields() {
        let mut record = sample();
        record.apply(ColorRangePatch {
            name: Some("renamed".to_owned()),
            ..ColorRangePatch::default()
        });
        assert_eq!(record.name, "renamed");
        assert!(record.is_default);
        assert_eq!(record.with_cleared, Some(true));
        assert_eq!(record.val_type, "float");
    }

    #[test]
    fn empty_ranges_are_rejected() {
        let patch = ColorRangePatch {
            ranges: Some(Map::new()),
            ..ColorRangePatch::default()
        };
        assert!(matches!(
            patch.validate(),
            Err(DomainError::Validation { ref field, .. }) if field == "ranges"
        ));
    }

    #[test]
    fn enum_strings_round_trip() {
        for vt in [ValueType::General, ValueType::Percent, ValueType::Hex, ValueType::Line] {
            assert_eq!(ValueType::parse(vt.as_str()), Some(vt));
        }
        assert_eq!(Direction::parse("desc"), Some(Direction::Desc));
        assert_eq!(Direction::parse("up"), None);
    }
}
