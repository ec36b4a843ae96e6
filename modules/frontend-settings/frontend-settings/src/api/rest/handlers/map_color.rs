use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use settings_auth::Authz;
use settings_errors::{ApiResult, Problem};

use crate::api::rest::dto::{
    LayerParams, MapColorCreateReq, MapColorDto, MapColorSummaryDto, MapColorUpdateReq,
    MapScopeParams,
};
use crate::api::rest::extract::{ApiJson, ApiPath, ApiQuery, ForcedQuery};
use crate::module::ConcreteAppServices;

#[utoipa::path(
    get, path = "/map/color/default", tag = "map",
    params(MapScopeParams),
    responses((status = 200, body = MapColorDto), (status = 404, body = Problem))
)]
pub async fn default_for(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiQuery(params): ApiQuery<MapScopeParams>,
) -> ApiResult<Json<MapColorDto>> {
    let record = svc.map_colors.default_for(&user, &params.into()).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    get, path = "/map/color/attributes_with_existing_default_color_range", tag = "map",
    params(LayerParams),
    responses((status = 200, body = Vec<String>))
)]
pub async fn attributes_with_default(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiQuery(params): ApiQuery<LayerParams>,
) -> ApiResult<Json<Vec<String>>> {
    let attributes = svc
        .map_colors
        .attributes_with_default(&user, &params.layer)
        .await?;
    Ok(Json(attributes))
}

#[utoipa::path(
    get, path = "/map/color/", tag = "map",
    params(MapScopeParams),
    responses((status = 200, body = Vec<MapColorSummaryDto>))
)]
pub async fn list(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiQuery(params): ApiQuery<MapScopeParams>,
) -> ApiResult<Json<Vec<MapColorSummaryDto>>> {
    let records = svc.map_colors.list(&user, &params.into()).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get, path = "/map/color/{id}", tag = "map",
    params(("id" = i32, Path)),
    responses((status = 200, body = MapColorDto), (status = 404, body = Problem))
)]
pub async fn get(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<Json<MapColorDto>> {
    let record = svc.map_colors.get(&user, id).await?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    post, path = "/map/color/", tag = "map",
    params(ForcedQuery), request_body = MapColorCreateReq,
    responses((status = 200, body = i32), (status = 409, body = Problem), (status = 422, body = Problem))
)]
pub async fn create(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiQuery(q): ApiQuery<ForcedQuery>,
    ApiJson(req): ApiJson<MapColorCreateReq>,
) -> ApiResult<Json<i32>> {
    let id = svc
        .map_colors
        .create(&user, req.into(), q.forced_default)
        .await?;
    Ok(Json(id))
}

#[utoipa::path(
    put, path = "/map/color/{id}", tag = "map",
    params(("id" = i32, Path), ForcedQuery), request_body = MapColorUpdateReq,
    responses((status = 204), (status = 404, body = Problem), (status = 409, body = Problem))
)]
pub async fn update(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(id): ApiPath<i32>,
    ApiQuery(q): ApiQuery<ForcedQuery>,
    ApiJson(req): ApiJson<MapColorUpdateReq>,
) -> ApiResult<StatusCode> {
    svc.map_colors
        .update(&user, id, req.into(), q.forced_default)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/map/color/{id}", tag = "map",
    params(("id" = i32, Path), ForcedQuery),
    responses((status = 204), (status = 404, body = Problem), (status = 409, body = Problem))
)]
pub async fn delete(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(id): ApiPath<i32>,
    ApiQuery(q): ApiQuery<ForcedQuery>,
) -> ApiResult<StatusCode> {
    svc.map_colors.delete(&user, id, q.forced_default).await?;
    Ok(StatusCode::NO_CONTENT)
}
