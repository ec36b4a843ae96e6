//! Configuration for the frontend settings module.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FrontendSettingsConfig {
    pub state: StateConfig,
    pub module_settings: ModuleSettingsConfig,
    pub color_range: ColorRangeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct StateConfig {
    /// Upper bound for `expires_in_minutes` on new state blobs. 0 disables it.
    pub expires_in_minutes_limit: u32,
    /// Grace period after expiry before the sweep deletes a row.
    pub drop_expired_minutes: u32,
    pub drop_interval_minutes: u32,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            expires_in_minutes_limit: 10_080,
            drop_expired_minutes: 43_200,
            drop_interval_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ModuleSettingsConfig {
    /// Max number of items bound into one statement.
    pub items_limit_in_query: usize,
}

impl Default for ModuleSettingsConfig {
    fn default() -> Self {
        Self {
            items_limit_in_query: 32_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ColorRangeConfig {
    pub filter_max_limit: u64,
}

impl Default for ColorRangeConfig {
    fn default() -> Self {
        Self {
            filter_max_limit: 1000,
        }
    }
}
