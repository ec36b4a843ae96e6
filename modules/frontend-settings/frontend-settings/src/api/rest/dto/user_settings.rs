use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::model::UserSettings;

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserSettingsReq {
    #[serde(default = "empty_object")]
    pub settings: Value,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserSettingsDto {
    pub key: String,
    pub settings: Value,
}

impl From<UserSettings> for UserSettingsDto {
    fn from(s: UserSettings) -> Self {
        Self {
            key: s.key,
            settings: s.settings,
        }
    }
}
