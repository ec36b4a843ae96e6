//! Saved process filter sets.

use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use settings_auth::Authz;
use settings_errors::{ApiResult, Problem};

use crate::api::rest::dto::{FilterSetDto, FilterSetListDto, FilterSetPatchReq, FilterSetReq};
use crate::api::rest::extract::{ApiJson, ApiPath};
use crate::module::ConcreteAppServices;

#[utoipa::path(
    post, path = "/process/filterSet", tag = "Process:filters",
    request_body = FilterSetReq,
    responses((status = 201, body = FilterSetDto), (status = 400, body = Problem))
)]
pub async fn create(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiJson(req): ApiJson<FilterSetReq>,
) -> ApiResult<(StatusCode, Json<FilterSetDto>)> {
    let created = svc.filter_sets.create(&user, req.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    get, path = "/process/filterSet", tag = "Process:filters",
    responses((status = 200, body = Vec<FilterSetListDto>))
)]
pub async fn list(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
) -> ApiResult<Json<Vec<FilterSetListDto>>> {
    let sets = svc.filter_sets.list(&user).await?;
    Ok(Json(
        sets.into_iter()
            .map(|s| FilterSetListDto::for_caller(s, &user.subject))
            .collect(),
    ))
}

#[utoipa::path(
    patch, path = "/process/filterSet", tag = "Process:filters",
    request_body = Vec<FilterSetPatchReq>,
    responses(
        (status = 200, body = Vec<FilterSetDto>),
        (status = 400, body = Problem),
        (status = 404, body = Problem)
    )
)]
pub async fn update_many(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiJson(req): ApiJson<Vec<FilterSetPatchReq>>,
) -> ApiResult<Json<Vec<FilterSetDto>>> {
    let updated = svc
        .filter_sets
        .update_many(&user, req.into_iter().map(Into::into).collect())
        .await?;
    Ok(Json(updated.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get, path = "/process/filterSet/{id}", tag = "Process:filters",
    params(("id" = i32, Path)),
    responses((status = 200, body = FilterSetDto), (status = 400, body = Problem))
)]
pub async fn get(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<FilterSetDto>> {
    Ok(Json(svc.filter_sets.get(&user, id).await?.into()))
}

#[utoipa::path(
    put, path = "/process/filterSet/{id}", tag = "Process:filters",
    params(("id" = i32, Path)),
    request_body = FilterSetReq,
    responses((status = 200, body = FilterSetDto), (status = 400, body = Problem))
)]
pub async fn update(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(id): ApiPath<i32>,
    ApiJson(req): ApiJson<FilterSetReq>,
) -> ApiResult<Json<FilterSetDto>> {
    Ok(Json(svc.filter_sets.update(&user, id, req.into()).await?.into()))
}

#[utoipa::path(
    delete, path = "/process/filterSet/{id}", tag = "Process:filters",
    params(("id" = i32, Path)),
    responses((status = 204), (status = 400, body = Problem))
)]
pub async fn delete(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    svc.filter_sets.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
