use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Registered frontend module with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub custom_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSettings {
    pub module_name: String,
    pub settings: Map<String, Value>,
}

/// One audit row. `domain` holds the module name on write and the display
/// name (custom name, falling back to name) on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsLog {
    pub domain: String,
    pub variable: String,
    pub user: String,
    pub change_time: DateTime<Utc>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LogSortField {
    Domain,
    Variable,
    User,
    ChangeTime,
    OldValue,
    NewValue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSort {
    pub field: LogSortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub module_names: Option<Vec<String>>,
    pub fields_keys: Option<Vec<String>>,
    pub from_date: Option<DateTime<Utc>>,
    pub to_date: Option<DateTime<Utc>>,
    pub users: Option<Vec<String>>,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub sort: Vec<LogSort>,
    pub limit: u64,
    pub offset: u64,
}

#[derive(Debug, Clone)]
pub struct SettingsLogPage {
    pub total_count: u64,
    pub page_count: u64,
    pub elements: Vec<SettingsLog>,
}
