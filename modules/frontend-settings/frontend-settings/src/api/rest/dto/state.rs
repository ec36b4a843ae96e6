use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StateCreateReq {
    #[schema(value_type = Object)]
    pub state: Map<String, Value>,
    /// 0 keeps the state forever.
    pub expires_in_minutes: u32,
}
