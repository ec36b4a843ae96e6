use serde_json::Value;

/// Settings document of one user under one key.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSettings {
    pub user: String,
    pub key: String,
    pub settings: Value,
}
