use serde_json::{Map, Value};
use settings_auth::Identity;

use super::color_range::EMPTY_RANGES;
use super::require_non_empty;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapColorScope {
    pub layer: String,
    pub attribute: String,
}

/// Color range keyed by map layer and attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct MapColor {
    pub id: i32,
    pub name: String,
    pub layer: String,
    pub attribute: String,
    pub range: Value,
    pub public: bool,
    pub is_default: bool,
    pub created_by: String,
    pub created_by_sub: String,
}

impl MapColor {
    #[must_use]
    pub fn scope(&self) -> MapColorScope {
        MapColorScope {
            layer: self.layer.clone(),
            attribute: self.attribute.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewMapColor {
    pub name: String,
    pub layer: String,
    pub attribute: String,
    pub range: Map<String, Value>,
    pub public: bool,
    pub is_default: bool,
}

impl NewMapColor {
    /// # Errors
    /// `Validation` for empty keys, names or ranges.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("layer", &self.layer)?;
        require_non_empty("attribute", &self.attribute)?;
        if self.range.is_empty() {
            return Err(DomainError::validation("range", EMPTY_RANGES));
        }
        Ok(())
    }

    #[must_use]
    pub fn scope(&self) -> MapColorScope {
        MapColorScope {
            layer: self.layer.clone(),
            attribute: self.attribute.clone(),
        }
    }

    #[must_use]
    pub fn into_record(self, owner: &Identity) -> MapColor {
        MapColor {
            id: 0,
            name: self.name,
            layer: self.layer,
            attribute: self.attribute,
            range: Value::Object(self.range),
            public: self.public,
            is_default: self.is_default,
            created_by: owner.name.clone(),
            created_by_sub: owner.subject.clone(),
        }
    }
}

/// Full replacement body of `PUT /map/color/{id}`.
#[derive(Debug, Clone)]
pub struct MapColorUpdate {
    pub name: String,
    pub range: Map<String, Value>,
    pub public: bool,
    pub is_default: bool,
}

impl MapColorUpdate {
    /// # Errors
    /// `Validation` for an empty name or range.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("name", &self.name)?;
        if self.range.is_empty() {
            return Err(DomainError::validation("range", EMPTY_RANGES));
        }
        Ok(())
    }
}
