use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use settings_auth::Authz;
use settings_errors::{ApiResult, Problem};

use crate::api::rest::dto::{LogFilterReq, LogPageDto, ModuleSettingsDto, ModuleSettingsUpdateReq};
use crate::api::rest::extract::{ApiJson, ApiPath};
use crate::module::ConcreteAppServices;

#[utoipa::path(
    get, path = "/module_settings", tag = "Module Settings",
    responses((status = 200, body = Vec<ModuleSettingsDto>))
)]
pub async fn list(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(_user): Authz,
) -> ApiResult<Json<Vec<ModuleSettingsDto>>> {
    let all = svc.module_settings.list().await?;
    Ok(Json(all.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post, path = "/module_settings", tag = "Module Settings",
    request_body = ModuleSettingsDto,
    responses((status = 201, body = ModuleSettingsDto), (status = 404, body = Problem), (status = 409, body = Problem))
)]
pub async fn create(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiJson(req): ApiJson<ModuleSettingsDto>,
) -> ApiResult<(StatusCode, Json<ModuleSettingsDto>)> {
    let created = svc.module_settings.create(&user, req.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get, path = "/module_settings/{name}", tag = "Module Settings",
    params(("name" = String, Path)),
    responses((status = 200, body = ModuleSettingsDto), (status = 404, body = Problem))
)]
pub async fn get(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(_user): Authz,
    ApiPath(name): ApiPath<String>,
) -> ApiResult<Json<ModuleSettingsDto>> {
    Ok(Json(svc.module_settings.get(&name).await?.into()))
}

#[utoipa::path(
    put, path = "/module_settings/{name}", tag = "Module Settings",
    params(("name" = String, Path)), request_body = ModuleSettingsUpdateReq,
    responses((status = 200, body = ModuleSettingsDto), (status = 404, body = Problem))
)]
pub async fn update(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(name): ApiPath<String>,
    ApiJson(req): ApiJson<ModuleSettingsUpdateReq>,
) -> ApiResult<Json<ModuleSettingsDto>> {
    let updated = svc.module_settings.update(&user, &name, req.settings).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete, path = "/module_settings/{name}", tag = "Module Settings",
    params(("name" = String, Path)),
    responses((status = 204), (status = 404, body = Problem))
)]
pub async fn delete(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(name): ApiPath<String>,
) -> ApiResult<StatusCode> {
    svc.module_settings.delete(&user, &name).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/module_settings_logs/get_msl_by_filters", tag = "Module Settings Logs",
    request_body = LogFilterReq,
    responses((status = 200, body = LogPageDto), (status = 422, body = Problem))
)]
pub async fn logs(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(_user): Authz,
    ApiJson(req): ApiJson<LogFilterReq>,
) -> ApiResult<Json<LogPageDto>> {
    let page = svc.module_settings.logs(&req.into()).await?;
    Ok(Json(page.into()))
}
