//! Conversions between table rows and domain records.
//!
//! Enum-like columns are stored as text; a row carrying an unknown value is
//! reported as a database error rather than silently coerced.

use anyhow::anyhow;
use sea_orm::ActiveValue::{NotSet, Set};

use crate::domain::error::DomainError;
use crate::domain::model::{
    ColorRange, Direction, FilterSet, JoinOperator, MapColor, Module, ModuleSettings, Preset,
    PresetKind, SettingsLog, StateBlob, UserSettings, ValueType,
};
use crate::infra::storage::entity::{
    color_range, filter_set, map_color, module, module_settings, settings_log, state,
    table_preset, user_settings,
};

fn corrupt(column: &str, raw: &str) -> DomainError {
    DomainError::Database(anyhow!("unexpected {column} value in storage: {raw}"))
}

impl TryFrom<color_range::Model> for ColorRange {
    type Error = DomainError;

    fn try_from(m: color_range::Model) -> Result<Self, Self::Error> {
        let value_type =
            ValueType::parse(&m.value_type).ok_or_else(|| corrupt("value_type", &m.value_type))?;
        let direction =
            Direction::parse(&m.direction).ok_or_else(|| corrupt("direction", &m.direction))?;
        Ok(Self {
            id: m.id,
            tmo_id: m.tmo_id,
            tprm_id: m.tprm_id,
            val_type: m.val_type,
            name: m.name,
            value_type,
            with_indeterminate: m.with_indeterminate,
            with_cleared: m.with_cleared,
            ranges: m.ranges,
            public: m.public,
            is_default: m.is_default,
            direction,
            created_by: m.created_by,
            created_by_sub: m.created_by_sub,
        })
    }
}

impl From<&ColorRange> for color_range::ActiveModel {
    fn from(r: &ColorRange) -> Self {
        Self {
            id: if r.id == 0 { NotSet } else { Set(r.id) },
            tmo_id: Set(r.tmo_id.clone()),
            tprm_id: Set(r.tprm_id.clone()),
            val_type: Set(r.val_type.clone()),
            name: Set(r.name.clone()),
            value_type: Set(r.value_type.as_str().to_owned()),
            with_indeterminate: Set(r.with_indeterminate),
            with_cleared: Set(r.with_cleared),
            ranges: Set(r.ranges.clone()),
            public: Set(r.public),
            direction: Set(r.direction.as_str().to_owned()),
            is_default: Set(r.is_default),
            created_by: Set(r.created_by.clone()),
            created_by_sub: Set(r.created_by_sub.clone()),
        }
    }
}

impl From<map_color::Model> for MapColor {
    fn from(m: map_color::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            layer: m.layer,
            attribute: m.attribute,
            range: m.range,
            public: m.public,
            is_default: m.is_default,
            created_by: m.created_by,
            created_by_sub: m.created_by_sub,
        }
    }
}

impl From<&MapColor> for map_color::ActiveModel {
    fn from(r: &MapColor) -> Self {
        Self {
            id: if r.id == 0 { NotSet } else { Set(r.id) },
            name: Set(r.name.clone()),
            layer: Set(r.layer.clone()),
            attribute: Set(r.attribute.clone()),
            range: Set(r.range.clone()),
            created_by: Set(r.created_by.clone()),
            created_by_sub: Set(r.created_by_sub.clone()),
            public: Set(r.public),
            is_default: Set(r.is_default),
        }
    }
}

impl TryFrom<table_preset::Model> for Preset {
    type Error = DomainError;

    fn try_from(m: table_preset::Model) -> Result<Self, Self::Error> {
        let kind = PresetKind::parse(&m.kind).ok_or_else(|| corrupt("kind", &m.kind))?;
        Ok(Self {
            id: m.id,
            kind,
            tmo_id: m.tmo_id,
            name: m.name,
            value: m.value,
            order: m.layout_order,
            pinned: m.pinned,
            public: m.public,
            is_default: m.is_default,
            created_by: m.created_by,
            created_by_sub: m.created_by_sub,
        })
    }
}

impl From<&Preset> for table_preset::ActiveModel {
    fn from(r: &Preset) -> Self {
        Self {
            id: if r.id == 0 { NotSet } else { Set(r.id) },
            kind: Set(r.kind.as_str().to_owned()),
            tmo_id: Set(r.tmo_id),
            name: Set(r.name.clone()),
            value: Set(r.value.clone()),
            layout_order: Set(r.order.clone()),
            pinned: Set(r.pinned.clone()),
            created_by: Set(r.created_by.clone()),
            created_by_sub: Set(r.created_by_sub.clone()),
            public: Set(r.public),
            is_default: Set(r.is_default),
        }
    }
}

impl TryFrom<filter_set::Model> for FilterSet {
    type Error = DomainError;

    fn try_from(m: filter_set::Model) -> Result<Self, Self::Error> {
        let join_operator = m
            .join_operator
            .map(|raw| JoinOperator::parse(&raw).ok_or_else(|| corrupt("join_operator", &raw)))
            .transpose()?;
        let tmo_info = match m.tmo_info {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Ok(Self {
            id: m.id,
            name: m.name,
            filters: m.filters,
            join_operator,
            public: m.public,
            tmo_info,
            priority: m.priority,
            hidden: m.hidden,
            created_by: m.created_by,
            created_by_sub: m.created_by_sub,
        })
    }
}

impl From<&FilterSet> for filter_set::ActiveModel {
    fn from(r: &FilterSet) -> Self {
        Self {
            id: if r.id == 0 { NotSet } else { Set(r.id) },
            name: Set(r.name.clone()),
            filters: Set(r.filters.clone()),
            join_operator: Set(r.join_operator.map(|op| op.as_str().to_owned())),
            created_by: Set(r.created_by.clone()),
            created_by_sub: Set(r.created_by_sub.clone()),
            public: Set(r.public),
            tmo_info: Set(serde_json::Value::Object(r.tmo_info.clone())),
            priority: Set(r.priority),
            hidden: Set(r.hidden),
        }
    }
}

impl From<module::Model> for Module {
    fn from(m: module::Model) -> Self {
        Self {
            name: m.name,
            custom_name: m.custom_name,
        }
    }
}

impl From<module_settings::Model> for ModuleSettings {
    fn from(m: module_settings::Model) -> Self {
        let settings = match m.settings {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Self {
            module_name: m.module,
            settings,
        }
    }
}

impl From<&ModuleSettings> for module_settings::ActiveModel {
    fn from(s: &ModuleSettings) -> Self {
        Self {
            module: Set(s.module_name.clone()),
            settings: Set(serde_json::Value::Object(s.settings.clone())),
        }
    }
}

/// The log row keeps the module key; `display_domain` is what the caller
/// sees (the custom name when one is set).
pub fn settings_log_from_row(m: settings_log::Model, display_domain: Option<String>) -> SettingsLog {
    SettingsLog {
        domain: display_domain.unwrap_or(m.domain),
        variable: m.variable,
        user: m.user,
        change_time: m.change_time,
        old_value: m.old_value,
        new_value: m.new_value,
    }
}

impl From<&SettingsLog> for settings_log::ActiveModel {
    fn from(l: &SettingsLog) -> Self {
        Self {
            id: NotSet,
            domain: Set(l.domain.clone()),
            variable: Set(l.variable.clone()),
            user: Set(l.user.clone()),
            change_time: Set(l.change_time),
            old_value: Set(l.old_value.clone()),
            new_value: Set(l.new_value.clone()),
        }
    }
}

impl From<state::Model> for StateBlob {
    fn from(m: state::Model) -> Self {
        Self {
            id: m.id,
            value: m.value,
            creation_date: m.creation_date,
            expire_date: m.expire_date,
            created_by: m.created_by,
        }
    }
}

impl From<&StateBlob> for state::ActiveModel {
    fn from(b: &StateBlob) -> Self {
        Self {
            id: Set(b.id),
            value: Set(b.value.clone()),
            creation_date: Set(b.creation_date),
            expire_date: Set(b.expire_date),
            created_by: Set(b.created_by.clone()),
        }
    }
}

impl From<user_settings::Model> for UserSettings {
    fn from(m: user_settings::Model) -> Self {
        Self {
            user: m.user,
            key: m.key,
            settings: m.settings,
        }
    }
}

impl From<&UserSettings> for user_settings::ActiveModel {
    fn from(s: &UserSettings) -> Self {
        Self {
            user: Set(s.user.clone()),
            key: Set(s.key.clone()),
            settings: Set(s.settings.clone()),
        }
    }
}
