use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use serde_json::Value;
use settings_auth::Authz;
use settings_errors::{ApiResult, Problem};
use uuid::Uuid;

use crate::api::rest::dto::StateCreateReq;
use crate::api::rest::extract::{ApiJson, ApiPath};
use crate::module::ConcreteAppServices;

#[utoipa::path(
    post, path = "/state/", tag = "state",
    request_body = StateCreateReq,
    responses((status = 200, body = String, description = "state id"), (status = 422, body = Problem))
)]
pub async fn save(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiJson(req): ApiJson<StateCreateReq>,
) -> ApiResult<Json<Uuid>> {
    let id = svc
        .state
        .save(&user, req.state, req.expires_in_minutes)
        .await?;
    Ok(Json(id))
}

#[utoipa::path(
    get, path = "/state/{id}", tag = "state",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = serde_json::Value), (status = 404, body = Problem))
)]
pub async fn get(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(_user): Authz,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Value>> {
    Ok(Json(svc.state.get(id).await?))
}
