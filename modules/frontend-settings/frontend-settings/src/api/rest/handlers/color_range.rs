use std::sync::Arc;

use axum::Json;
use axum::extract::Extension;
use axum::http::StatusCode;
use settings_auth::Authz;
use settings_errors::{ApiResult, Problem};

use crate::api::rest::dto::{
    ColorRangeCreateReq, ColorRangeDto, ColorRangeFilterReq, ColorRangePatchReq, ColorRangeView,
    DefaultsParams,
};
use crate::api::rest::extract::{ApiJson, ApiPath, ApiQuery, ForcedQuery};
use crate::module::ConcreteAppServices;

#[utoipa::path(
    post, path = "/color_range/", tag = "color",
    params(ForcedQuery), request_body = ColorRangeCreateReq,
    responses((status = 200, body = i32), (status = 409, body = Problem), (status = 422, body = Problem))
)]
pub async fn create(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiQuery(q): ApiQuery<ForcedQuery>,
    ApiJson(req): ApiJson<ColorRangeCreateReq>,
) -> ApiResult<Json<i32>> {
    let id = svc
        .color_ranges
        .create(&user, req.into(), q.forced_default)
        .await?;
    Ok(Json(id))
}

#[utoipa::path(
    patch, path = "/color_range/{id}", tag = "color",
    params(("id" = i32, Path), ForcedQuery), request_body = ColorRangePatchReq,
    responses((status = 204), (status = 404, body = Problem), (status = 409, body = Problem))
)]
pub async fn update(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(id): ApiPath<i32>,
    ApiQuery(q): ApiQuery<ForcedQuery>,
    ApiJson(req): ApiJson<ColorRangePatchReq>,
) -> ApiResult<StatusCode> {
    svc.color_ranges
        .update(&user, id, req.into(), q.forced_default)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/color_range/{id}", tag = "color",
    params(("id" = i32, Path), ForcedQuery),
    responses((status = 204), (status = 404, body = Problem), (status = 409, body = Problem))
)]
pub async fn delete(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiPath(id): ApiPath<i32>,
    ApiQuery(q): ApiQuery<ForcedQuery>,
) -> ApiResult<StatusCode> {
    svc.color_ranges.delete(&user, id, q.forced_default).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/color_range/filter", tag = "color",
    request_body = ColorRangeFilterReq,
    responses((status = 200, body = Vec<ColorRangeView>), (status = 422, body = Problem))
)]
pub async fn filter(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiJson(req): ApiJson<ColorRangeFilterReq>,
) -> ApiResult<Json<Vec<ColorRangeView>>> {
    let records = svc.color_ranges.filter(&user, &req.to_filter()).await?;
    Ok(Json(
        records
            .into_iter()
            .map(|r| ColorRangeView::new(r, req.only_description))
            .collect(),
    ))
}

#[utoipa::path(
    get, path = "/color_range/defaults", tag = "color",
    params(DefaultsParams),
    responses((status = 200, body = Vec<ColorRangeDto>), (status = 422, body = Problem))
)]
pub async fn defaults(
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Authz(user): Authz,
    ApiQuery(params): ApiQuery<DefaultsParams>,
) -> ApiResult<Json<Vec<ColorRangeDto>>> {
    let records = svc.color_ranges.defaults(&user, &params.into()).await?;
    Ok(Json(records.into_iter().map(Into::into).collect()))
}
