use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::{IntoParams, ToSchema};

use crate::domain::model::{
    LogFilter, LogSort, LogSortField, Module, ModuleSettings, SettingsLog, SettingsLogPage,
    SortDirection,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ModuleCreateReq {
    pub name: String,
    #[serde(default)]
    pub custom_name: Option<String>,
}

impl From<ModuleCreateReq> for Module {
    fn from(req: ModuleCreateReq) -> Self {
        Self {
            name: req.name,
            custom_name: req.custom_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModuleDto {
    pub name: String,
    pub custom_name: Option<String>,
}

impl From<Module> for ModuleDto {
    fn from(m: Module) -> Self {
        Self {
            name: m.name,
            custom_name: m.custom_name,
        }
    }
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomNameParams {
    pub custom_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModuleSettingsDto {
    pub module_name: String,
    #[schema(value_type = Object)]
    pub settings: Map<String, Value>,
}

impl From<ModuleSettings> for ModuleSettingsDto {
    fn from(s: ModuleSettings) -> Self {
        Self {
            module_name: s.module_name,
            settings: s.settings,
        }
    }
}

impl From<ModuleSettingsDto> for ModuleSettings {
    fn from(dto: ModuleSettingsDto) -> Self {
        Self {
            module_name: dto.module_name,
            settings: dto.settings,
        }
    }
}

/// `PUT /module_settings/{name}` body; the path names the module.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ModuleSettingsUpdateReq {
    #[serde(default)]
    pub module_name: Option<String>,
    #[schema(value_type = Object)]
    pub settings: Map<String, Value>,
}

/// RFC 3339, or a naive timestamp taken as UTC.
fn de_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct LogSortReq {
    pub sort_by: LogSortField,
    pub sort_direction: SortDirection,
}

fn default_log_limit() -> u64 {
    20
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LogFilterReq {
    #[serde(default)]
    pub module_names: Option<Vec<String>>,
    #[serde(default)]
    pub fields_keys: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de_timestamp")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub from_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "de_timestamp")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub to_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub users: Option<Vec<String>>,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
    #[serde(default)]
    pub sort_by: Option<Vec<LogSortReq>>,
    #[serde(default = "default_log_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

impl From<LogFilterReq> for LogFilter {
    fn from(req: LogFilterReq) -> Self {
        Self {
            module_names: req.module_names,
            fields_keys: req.fields_keys,
            from_date: req.from_date,
            to_date: req.to_date,
            users: req.users,
            old_value: req.old_value,
            new_value: req.new_value,
            sort: req
                .sort_by
                .unwrap_or_default()
                .into_iter()
                .map(|s| LogSort {
                    field: s.sort_by,
                    direction: s.sort_direction,
                })
                .collect(),
            limit: req.limit,
            offset: req.offset,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LogElementDto {
    pub change_time: DateTime<Utc>,
    pub user: String,
    pub domain: String,
    pub variable: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl From<SettingsLog> for LogElementDto {
    fn from(log: SettingsLog) -> Self {
        Self {
            change_time: log.change_time,
            user: log.user,
            domain: log.domain,
            variable: log.variable,
            old_value: log.old_value,
            new_value: log.new_value,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LogMetaDto {
    pub total_count: u64,
    pub page_count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LogPageDto {
    pub meta: LogMetaDto,
    pub elements: Vec<LogElementDto>,
}

impl From<SettingsLogPage> for LogPageDto {
    fn from(page: SettingsLogPage) -> Self {
        Self {
            meta: LogMetaDto {
                total_count: page.total_count,
                page_count: page.page_count,
            },
            elements: page.elements.into_iter().map(Into::into).collect(),
        }
    }
}
