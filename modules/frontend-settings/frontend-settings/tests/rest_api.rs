#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end REST tests: the real router over in-memory SQLite.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use frontend_settings::{FrontendSettingsConfig, FrontendSettingsModule};
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use settings_auth::{AuthError, AuthState, Authenticator, Identity, RequestMeta};
use tower::ServiceExt;

/// Resolves the caller from `x-test-user`; requests without it are rejected.
struct HeaderAuthenticator;

#[async_trait]
impl Authenticator for HeaderAuthenticator {
    async fn authenticate(&self, request: &RequestMeta<'_>) -> Result<Identity, AuthError> {
        let subject = request
            .headers
            .get("x-test-user")
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::Unauthenticated)?;
        Ok(Identity {
            subject: subject.to_owned(),
            name: format!("User {subject}"),
            preferred_username: Some(subject.to_owned()),
            audience: Vec::new(),
            realm_roles: Vec::new(),
            client_roles: BTreeMap::new(),
            groups: Vec::new(),
        })
    }
}

async fn app() -> Router {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    FrontendSettingsModule::migrate(&db).await.unwrap();
    let module = FrontendSettingsModule::new(&db, FrontendSettingsConfig::default());
    module.rest_router(AuthState::new(Arc::new(HeaderAuthenticator)))
}

async fn call(app: &Router, method: Method, uri: &str, user: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-test-user", user);
    let request = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn color_range(name: &str, public: bool, default: bool) -> Value {
    json!({
        "tmoId": "10",
        "tprmId": "20",
        "name": name,
        "public": public,
        "default": default,
        "value_type": "General",
        "ranges": {"colors": [{"hex": "#FF0000"}]}
    })
}

#[tokio::test]
async fn requests_without_identity_are_rejected() {
    let app = app().await;
    let request = Request::builder()
        .uri("/modules/all")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn color_range_default_slot_lifecycle() {
    let app = app().await;

    let (status, first) = call(&app, Method::POST, "/color_range/", "alice", Some(color_range("first", true, true))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, problem) = call(&app, Method::POST, "/color_range/", "bob", Some(color_range("second", true, true))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(problem["detail"].as_str().unwrap().contains("forced replacement"));

    let (status, second) = call(
        &app,
        Method::POST,
        "/color_range/?forced_default=true",
        "bob",
        Some(color_range("second", true, true)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, defaults) = call(&app, Method::GET, "/color_range/defaults?tmo_id=10", "carol", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(defaults.as_array().unwrap().len(), 1);
    assert_eq!(defaults[0]["id"], second);
    assert_eq!(defaults[0]["valType"], "float");

    let (status, _) = call(&app, Method::DELETE, &format!("/color_range/{first}"), "alice", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&app, Method::DELETE, &format!("/color_range/{second}"), "bob", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn color_range_filter_returns_summaries_by_default() {
    let app = app().await;
    call(&app, Method::POST, "/color_range/", "alice", Some(color_range("first", true, false))).await;

    let (status, rows) = call(&app, Method::POST, "/color_range/filter", "bob", Some(json!({"tmo_ids": ["10"]}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows[0]["name"], "first");
    assert!(rows[0].get("ranges").is_none());

    let (_, rows) = call(
        &app,
        Method::POST,
        "/color_range/filter",
        "bob",
        Some(json!({"tmo_ids": ["10"], "only_description": false})),
    )
    .await;
    assert_eq!(rows[0]["ranges"]["colors"][0]["hex"], "#FF0000");
}

#[tokio::test]
async fn malformed_body_is_a_validation_problem() {
    let app = app().await;
    let (status, problem) = call(&app, Method::POST, "/color_range/", "alice", Some(json!({"tmoId": "10"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(problem["status"], 422);
}

#[tokio::test]
async fn table_presets_return_empty_object_without_default() {
    let app = app().await;
    let (status, body) = call(&app, Method::GET, "/table/columns/default/tmo/5", "alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let preset = json!({"name": "wide", "public": false, "default": true, "value": {"a": 1}, "order": ["a"]});
    let (status, id) = call(&app, Method::POST, "/table/columns/tmo/5", "alice", Some(preset)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = call(&app, Method::GET, "/table/columns/default/tmo/5", "alice", None).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["order"], json!(["a"]));

    let (status, _) = call(&app, Method::GET, &format!("/table/filters/setting/{id}"), "alice", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn object_params_default_is_not_found_until_set() {
    let app = app().await;
    let (status, problem) = call(&app, Method::GET, "/object/params/default?tmo_id=3", "alice", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["detail"], "Default value not set yet");

    let (status, problem) = call(&app, Method::GET, "/object/params/?tmo_id=3", "alice", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["detail"], "Settings not found");

    let body = json!({"name": "p", "public": true, "default": true, "value": {"x": 1}});
    let (status, _) = call(&app, Method::POST, "/object/params/?tmo_id=3", "alice", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, preset) = call(&app, Method::GET, "/object/params/default?tmo_id=3", "bob", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(preset["name"], "p");
}

#[tokio::test]
async fn module_settings_are_audited() {
    let app = app().await;
    let (status, _) = call(&app, Method::POST, "/modules/", "alice", Some(json!({"name": "inventory", "custom_name": "Inventory"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(
        &app,
        Method::POST,
        "/module_settings",
        "alice",
        Some(json!({"module_name": "inventory", "settings": {"grid": {"rows": 10}}})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(
        &app,
        Method::PUT,
        "/module_settings/inventory",
        "bob",
        Some(json!({"settings": {"grid": {"rows": 25}}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, page) = call(
        &app,
        Method::POST,
        "/module_settings_logs/get_msl_by_filters",
        "alice",
        Some(json!({"module_names": ["Inventory"], "users": ["User bob"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total_count"], 1);
    assert_eq!(page["elements"][0]["variable"], "grid/rows");
    assert_eq!(page["elements"][0]["old_value"], "10");
    assert_eq!(page["elements"][0]["new_value"], "25");
}

#[tokio::test]
async fn modules_registry_round_trip() {
    let app = app().await;
    call(&app, Method::POST, "/modules/", "alice", Some(json!({"name": "inventory"}))).await;
    call(&app, Method::POST, "/modules/", "alice", Some(json!({"name": "map"}))).await;

    let (status, applied) = call(
        &app,
        Method::PATCH,
        "/modules/all",
        "alice",
        Some(json!({"inventory": "Stock", "ghost": "Boo"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(applied, json!({"inventory": "Stock"}));

    let (status, problem) = call(&app, Method::PATCH, "/modules/map?custom_name=Stock", "alice", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["detail"], "Module named 'Stock' already exists!");

    let (status, _) = call(&app, Method::DELETE, "/modules/map", "alice", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, problem) = call(&app, Method::GET, "/modules/map", "alice", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["detail"], "Source with name=map does not exist!");
}

#[tokio::test]
async fn state_and_user_settings_round_trip() {
    let app = app().await;
    let (status, id) = call(
        &app,
        Method::POST,
        "/state/",
        "alice",
        Some(json!({"state": {"tab": 2}, "expires_in_minutes": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, state) = call(&app, Method::GET, &format!("/state/{}", id.as_str().unwrap()), "bob", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state, json!({"tab": 2}));

    let (status, _) = call(&app, Method::POST, "/user_settings/grid", "alice", Some(json!({"settings": {"dense": true}}))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, keys) = call(&app, Method::GET, "/user_settings/", "alice", None).await;
    assert_eq!(keys, json!(["grid"]));
    let (status, _) = call(&app, Method::GET, "/user_settings/grid", "bob", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn filter_set(name: &str, public: bool) -> Value {
    json!({
        "name": name,
        "filters": [{"column": {"name": "state"}, "operator": "eq", "value": "late"}],
        "public": public,
        "join_operator": "AND",
        "tmo_info": {"tmo_id": 12},
        "priority": 1
    })
}

#[tokio::test]
async fn process_filter_sets_round_trip() {
    let app = app().await;

    let (status, created) = call(&app, Method::POST, "/process/filterSet", "alice", Some(filter_set("late", false))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["hidden"], false);
    let id = created["id"].as_i64().unwrap();

    let (status, _) = call(&app, Method::POST, "/process/filterSet", "bob", Some(filter_set("shared", true))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, Method::POST, "/process/filterSet", "alice", Some(filter_set("shared", false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "FilterSet named shared already exists.");

    let (status, listed) = call(&app, Method::GET, "/process/filterSet", "alice", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows: Vec<(&str, bool)> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| (r["name"].as_str().unwrap(), r["owner"].as_bool().unwrap()))
        .collect();
    assert_eq!(rows, [("late", true), ("shared", false)]);

    let (status, patched) = call(
        &app,
        Method::PATCH,
        "/process/filterSet",
        "alice",
        Some(json!([{"id": id, "priority": 3, "join_operator": null}])),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched[0]["priority"], 3);
    assert_eq!(patched[0]["join_operator"], Value::Null);
    assert_eq!(patched[0]["name"], "late");

    let (status, body) = call(
        &app,
        Method::PATCH,
        "/process/filterSet",
        "alice",
        Some(json!([{"id": 999, "priority": 3}])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "FilterSets with id: [999] do not exist!");

    let uri = format!("/process/filterSet/{id}");
    let (status, replaced) = call(&app, Method::PUT, &uri, "alice", Some(filter_set("late v2", true))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["public"], true);

    let (status, seen) = call(&app, Method::GET, &uri, "bob", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seen["name"], "late v2");

    let (status, _) = call(&app, Method::DELETE, &uri, "bob", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&app, Method::DELETE, &uri, "alice", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = call(&app, Method::GET, &uri, "alice", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], format!("FilterSet with id = {id} does not exist!"));
}
