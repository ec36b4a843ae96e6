use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use settings_auth::Authz;
use settings_errors::{ApiResult, Problem};

use crate::api::rest::dto::{CustomNameParams, ModuleCreateReq, ModuleDto};
use crate::api::rest::extract::{ApiJson, ApiPath, ApiQuery};
use crate::domain::model::Module;
use crate::domain::service::ModuleNames;
use crate::module::ConcreteAppServices;

fn single(module: Module) -> Json<ModuleNames> {
    Json(ModuleNames::from([(module.name, module.custom_name)]))
}

#[utoipa::path(
    get, path = "/modules/all", tag = "Modules",
    responses((status = 200, body = std::collections::BTreeMap<String, Option<String>>, description = "module name to custom name"))
)]
pub async fn list(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(_user): Authz,
) -> ApiResult<Json<ModuleNames>> {
    Ok(Json(svc.modules.list().await?))
}

#[utoipa::path(
    patch, path = "/modules/all", tag = "Modules",
    request_body = std::collections::BTreeMap<String, Option<String>>,
    responses((status = 200, body = std::collections::BTreeMap<String, Option<String>>), (status = 400, body = Problem))
)]
pub async fn rename_many(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(_user): Authz,
    ApiJson(names): ApiJson<ModuleNames>,
) -> ApiResult<Json<ModuleNames>> {
    Ok(Json(svc.modules.rename_many(names).await?))
}

#[utoipa::path(
    get, path = "/modules/{name}", tag = "Modules",
    params(("name" = String, Path)),
    responses((status = 200, body = std::collections::BTreeMap<String, Option<String>>), (status = 404, body = Problem))
)]
pub async fn get(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(_user): Authz,
    ApiPath(name): ApiPath<String>,
) -> ApiResult<Json<ModuleNames>> {
    Ok(single(svc.modules.get(&name).await?))
}

#[utoipa::path(
    patch, path = "/modules/{name}", tag = "Modules",
    params(("name" = String, Path), CustomNameParams),
    responses((status = 200, body = std::collections::BTreeMap<String, Option<String>>), (status = 400, body = Problem), (status = 404, body = Problem))
)]
pub async fn rename(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(_user): Authz,
    ApiPath(name): ApiPath<String>,
    ApiQuery(params): ApiQuery<CustomNameParams>,
) -> ApiResult<Json<ModuleNames>> {
    Ok(single(svc.modules.rename(&name, &params.custom_name).await?))
}

#[utoipa::path(
    post, path = "/modules/", tag = "Modules",
    request_body = ModuleCreateReq,
    responses((status = 201, body = ModuleDto), (status = 409, body = Problem))
)]
pub async fn create(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(_user): Authz,
    ApiJson(req): ApiJson<ModuleCreateReq>,
) -> ApiResult<(StatusCode, Json<ModuleDto>)> {
    let module = svc.modules.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(module.into())))
}

#[utoipa::path(
    delete, path = "/modules/{name}", tag = "Modules",
    params(("name" = String, Path)),
    responses((status = 204), (status = 404, body = Problem))
)]
pub async fn delete(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(_user): Authz,
    ApiPath(name): ApiPath<String>,
) -> ApiResult<StatusCode> {
    svc.modules.delete(&name).await?;
    Ok(StatusCode::NO_CONTENT)
}
