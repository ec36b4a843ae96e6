use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use settings_auth::Authz;
use settings_errors::{ApiResult, Problem};

use crate::api::rest::dto::{UserSettingsDto, UserSettingsReq};
use crate::api::rest::extract::{ApiJson, ApiPath};
use crate::module::ConcreteAppServices;

#[utoipa::path(
    get, path = "/user_settings/", tag = "user_settings",
    responses((status = 200, body = Vec<String>))
)]
pub async fn keys(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(svc.user_settings.keys(&user).await?))
}

#[utoipa::path(
    get, path = "/user_settings/{key}", tag = "user_settings",
    params(("key" = String, Path)),
    responses((status = 200, body = UserSettingsDto), (status = 404, body = Problem))
)]
pub async fn get(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(key): ApiPath<String>,
) -> ApiResult<Json<UserSettingsDto>> {
    Ok(Json(svc.user_settings.get(&user, &key).await?.into()))
}

#[utoipa::path(
    post, path = "/user_settings/{key}", tag = "user_settings",
    params(("key" = String, Path)), request_body = UserSettingsReq,
    responses((status = 200, body = UserSettingsDto), (status = 409, body = Problem))
)]
pub async fn create(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(key): ApiPath<String>,
    ApiJson(req): ApiJson<UserSettingsReq>,
) -> ApiResult<Json<UserSettingsDto>> {
    let created = svc.user_settings.create(&user, &key, req.settings).await?;
    Ok(Json(created.into()))
}

#[utoipa::path(
    put, path = "/user_settings/{key}", tag = "user_settings",
    params(("key" = String, Path)), request_body = UserSettingsReq,
    responses((status = 200, body = UserSettingsDto), (status = 404, body = Problem))
)]
pub async fn update(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(key): ApiPath<String>,
    ApiJson(req): ApiJson<UserSettingsReq>,
) -> ApiResult<Json<UserSettingsDto>> {
    let updated = svc.user_settings.update(&user, &key, req.settings).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete, path = "/user_settings/{key}", tag = "user_settings",
    params(("key" = String, Path)),
    responses((status = 204), (status = 404, body = Problem))
)]
pub async fn delete(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(key): ApiPath<String>,
) -> ApiResult<StatusCode> {
    svc.user_settings.delete(&user, &key).await?;
    Ok(StatusCode::NO_CONTENT)
}
