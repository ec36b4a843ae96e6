//! Table column, table filter and object parameter presets. The router
//! attaches the [`PresetKind`] as an extension; `get`, `update` and `delete`
//! serve all three kinds.

use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use settings_auth::Authz;
use settings_errors::{ApiResult, Problem};

use crate::api::rest::dto::{PresetDto, PresetReq, PresetSummaryDto, TmoParams};
use crate::api::rest::extract::{ApiJson, ApiPath, ApiQuery, ForcedQuery};
use crate::domain::model::{Preset, PresetKind};
use crate::module::ConcreteAppServices;

fn summaries(presets: Vec<Preset>) -> Json<Vec<PresetSummaryDto>> {
    Json(presets.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    get, path = "/table/{kind}/default/tmo/{tmo_id}", tag = "table",
    params(("kind" = String, Path, description = "columns or filters"), ("tmo_id" = i64, Path)),
    responses((status = 200, body = PresetDto, description = "`{}` when no default is set"))
)]
pub async fn table_default(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Extension(kind): Extension<PresetKind>,
    Authz(user): Authz,
    ApiPath(tmo_id): ApiPath<i64>,
) -> ApiResult<Response> {
    let preset = svc.presets.default_for(&user, kind, tmo_id).await?;
    Ok(match preset {
        Some(p) => Json(PresetDto::from(p)).into_response(),
        None => Json(json!({})).into_response(),
    })
}

#[utoipa::path(
    get, path = "/table/{kind}/tmo/all", tag = "table",
    params(("kind" = String, Path)),
    responses((status = 200, body = Vec<PresetSummaryDto>))
)]
pub async fn table_list_all(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Extension(kind): Extension<PresetKind>,
    Authz(user): Authz,
) -> ApiResult<Json<Vec<PresetSummaryDto>>> {
    Ok(summaries(svc.presets.list_all(&user, kind).await?))
}

#[utoipa::path(
    get, path = "/table/{kind}/tmo/{tmo_id}", tag = "table",
    params(("kind" = String, Path), ("tmo_id" = i64, Path)),
    responses((status = 200, body = Vec<PresetSummaryDto>))
)]
pub async fn table_list(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Extension(kind): Extension<PresetKind>,
    Authz(user): Authz,
    ApiPath(tmo_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<PresetSummaryDto>>> {
    Ok(summaries(svc.presets.list(&user, kind, tmo_id).await?))
}

#[utoipa::path(
    post, path = "/table/{kind}/tmo/{tmo_id}", tag = "table",
    params(("kind" = String, Path), ("tmo_id" = i64, Path), ForcedQuery),
    request_body = PresetReq,
    responses((status = 201, body = i32), (status = 409, body = Problem))
)]
pub async fn table_create(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Extension(kind): Extension<PresetKind>,
    Authz(user): Authz,
    ApiPath(tmo_id): ApiPath<i64>,
    ApiQuery(q): ApiQuery<ForcedQuery>,
    ApiJson(req): ApiJson<PresetReq>,
) -> ApiResult<(StatusCode, Json<i32>)> {
    let id = svc
        .presets
        .create(&user, kind, tmo_id, req.into(), q.forced_default)
        .await?;
    Ok((StatusCode::CREATED, Json(id)))
}

#[utoipa::path(
    get, path = "/table/{kind}/setting/{id}", tag = "table",
    params(("kind" = String, Path), ("id" = i32, Path)),
    responses((status = 200, body = PresetDto), (status = 404, body = Problem))
)]
pub async fn get(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Extension(kind): Extension<PresetKind>,
    Authz(user): Authz,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<PresetDto>> {
    Ok(Json(svc.presets.get(&user, kind, id).await?.into()))
}

#[utoipa::path(
    put, path = "/table/{kind}/setting/{id}", tag = "table",
    params(("kind" = String, Path), ("id" = i32, Path), ForcedQuery),
    request_body = PresetReq,
    responses((status = 204), (status = 404, body = Problem), (status = 409, body = Problem))
)]
pub async fn update(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Extension(kind): Extension<PresetKind>,
    Authz(user): Authz,
    ApiPath(id): ApiPath<i32>,
    ApiQuery(q): ApiQuery<ForcedQuery>,
    ApiJson(req): ApiJson<PresetReq>,
) -> ApiResult<StatusCode> {
    svc.presets
        .update(&user, kind, id, req.into(), q.forced_default)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/table/{kind}/setting/{id}", tag = "table",
    params(("kind" = String, Path), ("id" = i32, Path), ForcedQuery),
    responses((status = 204), (status = 404, body = Problem), (status = 409, body = Problem))
)]
pub async fn delete(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Extension(kind): Extension<PresetKind>,
    Authz(user): Authz,
    ApiPath(id): ApiPath<i32>,
    ApiQuery(q): ApiQuery<ForcedQuery>,
) -> ApiResult<StatusCode> {
    svc.presets.delete(&user, kind, id, q.forced_default).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/object/params/default", tag = "object_params",
    params(TmoParams),
    responses((status = 200, body = PresetDto), (status = 404, body = Problem))
)]
pub async fn object_default(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiQuery(params): ApiQuery<TmoParams>,
) -> ApiResult<Json<PresetDto>> {
    let preset = svc
        .presets
        .require_default(&user, PresetKind::ObjectParams, params.tmo_id)
        .await?;
    Ok(Json(preset.into()))
}

#[utoipa::path(
    get, path = "/object/params/", tag = "object_params",
    params(TmoParams),
    responses((status = 200, body = Vec<PresetSummaryDto>), (status = 404, body = Problem))
)]
pub async fn object_list(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiQuery(params): ApiQuery<TmoParams>,
) -> ApiResult<Json<Vec<PresetSummaryDto>>> {
    let presets = svc
        .presets
        .list_non_empty(&user, PresetKind::ObjectParams, params.tmo_id)
        .await?;
    Ok(summaries(presets))
}

#[utoipa::path(
    post, path = "/object/params/", tag = "object_params",
    params(TmoParams, ForcedQuery), request_body = PresetReq,
    responses((status = 201, body = i32), (status = 409, body = Problem))
)]
pub async fn object_create(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiQuery(params): ApiQuery<TmoParams>,
    ApiQuery(q): ApiQuery<ForcedQuery>,
    ApiJson(req): ApiJson<PresetReq>,
) -> ApiResult<(StatusCode, Json<i32>)> {
    let id = svc
        .presets
        .create(
            &user,
            PresetKind::ObjectParams,
            params.tmo_id,
            req.into(),
            q.forced_default,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(id)))
}
