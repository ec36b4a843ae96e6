//! Extractors whose rejections render as problem responses.

use axum::extract::{FromRequest, FromRequestParts};
use serde::Deserialize;
use settings_errors::Problem;
use utoipa::IntoParams;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Problem))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Problem))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Problem))]
pub struct ApiPath<T>(pub T);

/// `?forced_default=true` lets a write displace or remove a default.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ForcedQuery {
    #[serde(default)]
    pub forced_default: bool,
}
