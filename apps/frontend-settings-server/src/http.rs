//! Outer HTTP router: health and docs endpoints plus the cross-cutting layers
//! around the module's API routes.

use std::sync::Arc;

use axum::http::{HeaderName, Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

const REQUEST_ID_HEADER: &str = "x-request-id";

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

/// Mounts `api` under the configured prefix.
///
/// Layer registration order is the reverse of execution: the request id is set
/// first, then traced, then timed out.
#[must_use]
pub fn build_router(cfg: &ServerConfig, mut api: Router) -> Router {
    if cfg.docs_enabled {
        let doc = Arc::new(frontend_settings::api::rest::document(&cfg.prefix));
        api = api.route(
            "/openapi.json",
            get(move || {
                let doc = doc.clone();
                async move { Json(doc.as_ref().clone()) }
            }),
        );
    }

    let mut router = Router::new()
        .route("/health", get(health))
        .nest(&cfg.prefix, api);

    if cfg.cors_allow_any {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        cfg.request_timeout,
    ));

    router = router.layer(TraceLayer::new_for_http().make_span_with(
        |req: &Request<axum::body::Body>| {
            let rid = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("n/a");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri().path(),
                request_id = %rid,
            )
        },
    ));

    let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use axum::body::{Body, to_bytes};
    use tower::ServiceExt;

    use super::*;

    fn api() -> Router {
        Router::new().route("/ping", get(|| async { "pong" }))
    }

    async fn get_body(router: Router, uri: &str) -> (StatusCode, Vec<u8>, Option<String>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let rid = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .map(|v| v.to_str().unwrap().to_owned());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec(), rid)
    }

    #[tokio::test]
    async fn api_is_served_under_prefix_with_request_id() {
        let router = build_router(&ServerConfig::default(), api());
        let (status, body, rid) = get_body(router.clone(), "/api/frontend_settings/v1/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"pong");
        assert!(rid.is_some_and(|r| !r.is_empty()));

        let (status, ..) = get_body(router, "/ping").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn health_and_docs() {
        let router = build_router(&ServerConfig::default(), api());
        let (status, body, _) = get_body(router.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            json!({"status": "ok"})
        );

        let (status, body, _) =
            get_body(router, "/api/frontend_settings/v1/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(doc["servers"][0]["url"], "/api/frontend_settings/v1");
    }

    #[tokio::test]
    async fn docs_can_be_disabled() {
        let cfg = ServerConfig {
            docs_enabled: false,
            ..ServerConfig::default()
        };
        let router = build_router(&cfg, api());
        let (status, ..) = get_body(router, "/api/frontend_settings/v1/openapi.json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
