#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Identity strategies against mocked Keycloak and OPA endpoints.

use std::time::{SystemTime, UNIX_EPOCH};

use http::{HeaderMap, Method};
use httpmock::prelude::*;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};
use settings_auth::{
    AuthError, KeycloakConfig, OpaConfig, RequestMeta, SecurityConfig, StrategyKind,
    build_authenticator,
};

const PRIVATE_KEY: &str = include_str!("fixtures/realm_private.pem");
const PUBLIC_KEY: &str = include_str!("fixtures/realm_public.b64");

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn sign(claims: &Value) -> String {
    let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
    encode(&Header::new(Algorithm::RS256), claims, &key).unwrap()
}

fn user_claims(roles: &[&str]) -> Value {
    json!({
        "sub": "3f1d",
        "given_name": "Grace",
        "family_name": "Hopper",
        "preferred_username": "grace",
        "realm_access": {"roles": roles},
        "exp": now() + 3600,
    })
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    headers
}

fn meta<'a>(headers: &'a HeaderMap) -> RequestMeta<'a> {
    RequestMeta {
        method: &Method::GET,
        path: "/state/42",
        root_path: "/api/frontend_settings/v1",
        headers,
    }
}

fn config(strategy: StrategyKind, server: &MockServer) -> SecurityConfig {
    SecurityConfig {
        strategy,
        keycloak: KeycloakConfig {
            url: server.base_url(),
            realm: "test".to_owned(),
            ..KeycloakConfig::default()
        },
        opa: OpaConfig {
            url: server.base_url(),
            policy: "frontend/allow".to_owned(),
            ..OpaConfig::default()
        },
        ..SecurityConfig::default()
    }
}

fn mock_realm(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/realms/test");
        then.status(200)
            .header("content-type", "application/json")
            .body(json!({"realm": "test", "public_key": PUBLIC_KEY}).to_string());
    })
}

#[tokio::test]
async fn keycloak_accepts_signed_token() {
    let server = MockServer::start();
    let realm = mock_realm(&server);
    let auth = build_authenticator(&config(StrategyKind::Keycloak, &server)).unwrap();

    let headers = bearer(&sign(&user_claims(&["viewer"])));
    let identity = auth.authenticate(&meta(&headers)).await.unwrap();
    assert_eq!(identity.subject, "3f1d");
    assert_eq!(identity.name, "Grace Hopper");

    // The realm key is fetched once.
    auth.authenticate(&meta(&headers)).await.unwrap();
    realm.assert_calls(1);
}

#[tokio::test]
async fn keycloak_requires_bearer_token() {
    let server = MockServer::start();
    let auth = build_authenticator(&config(StrategyKind::Keycloak, &server)).unwrap();

    let headers = HeaderMap::new();
    let err = auth.authenticate(&meta(&headers)).await.unwrap_err();
    assert!(matches!(err, AuthError::Unauthenticated));
}

#[tokio::test]
async fn keycloak_rejects_expired_token() {
    let server = MockServer::start();
    mock_realm(&server);
    let auth = build_authenticator(&config(StrategyKind::Keycloak, &server)).unwrap();

    let mut claims = user_claims(&[]);
    claims["exp"] = json!(now() - 3600);
    let headers = bearer(&sign(&claims));
    let err = auth.authenticate(&meta(&headers)).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken(_)));
}

#[tokio::test]
async fn keycloak_unreachable_is_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/realms/test");
        then.status(500);
    });
    let auth = build_authenticator(&config(StrategyKind::Keycloak, &server)).unwrap();

    let headers = bearer(&sign(&user_claims(&[])));
    let err = auth.authenticate(&meta(&headers)).await.unwrap_err();
    assert!(matches!(err, AuthError::ProviderUnavailable));
}

#[tokio::test]
async fn keycloak_info_merges_userinfo_once_per_token() {
    let server = MockServer::start();
    mock_realm(&server);
    let userinfo = server.mock(|when, then| {
        when.method(GET)
            .path("/realms/test/protocol/openid-connect/userinfo");
        then.status(200)
            .header("content-type", "application/json")
            .body(json!({"groups": ["/inventory/ops"]}).to_string());
    });
    let auth = build_authenticator(&config(StrategyKind::KeycloakInfo, &server)).unwrap();

    let headers = bearer(&sign(&user_claims(&[])));
    let identity = auth.authenticate(&meta(&headers)).await.unwrap();
    assert_eq!(identity.groups, vec!["/inventory/ops"]);

    auth.authenticate(&meta(&headers)).await.unwrap();
    userinfo.assert_calls(1);
}

#[tokio::test]
async fn opa_raw_allows_when_policy_allows() {
    let server = MockServer::start();
    let token = sign(&user_claims(&[]));
    let opa = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/data/frontend/allow")
            .header("authorization", format!("Bearer {token}"))
            .header("x-request-id", "req-7")
            .body_includes(r#""method":"GET""#)
            .body_includes(r#""path":["state","42"]"#)
            .body_includes(r#""root_path":["api","frontend_settings","v1"]"#)
            .body_includes(r#""server_host":"settings.local""#)
            .body_includes(r#""server_port":8000"#);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"result":{"allow":true}}"#);
    });
    let auth = build_authenticator(&config(StrategyKind::OpaJwtRaw, &server)).unwrap();

    // No realm mock: raw mode never fetches the signing key.
    let mut headers = bearer(&token);
    headers.insert(http::header::HOST, "settings.local:8000".parse().unwrap());
    headers.insert("x-request-id", "req-7".parse().unwrap());
    let identity = auth.authenticate(&meta(&headers)).await.unwrap();
    assert_eq!(identity.subject, "3f1d");
    opa.assert_calls(1);
}

#[tokio::test]
async fn opa_denial_is_forbidden() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/data/frontend/allow");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"result":{"allow":false}}"#);
    });
    let auth = build_authenticator(&config(StrategyKind::OpaJwtRaw, &server)).unwrap();

    let headers = bearer(&sign(&user_claims(&[])));
    let err = auth.authenticate(&meta(&headers)).await.unwrap_err();
    assert!(matches!(err, AuthError::Forbidden(ref m) if m == "Not allowed"));
}

#[tokio::test]
async fn opa_error_status_is_forbidden() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/data/frontend/allow");
        then.status(500);
    });
    let auth = build_authenticator(&config(StrategyKind::OpaJwtRaw, &server)).unwrap();

    let headers = bearer(&sign(&user_claims(&[])));
    let err = auth.authenticate(&meta(&headers)).await.unwrap_err();
    assert!(matches!(err, AuthError::Forbidden(ref m) if m == "Check authorization server"));
}

#[tokio::test]
async fn opa_parsed_admin_skips_policy() {
    let server = MockServer::start();
    mock_realm(&server);
    let opa = server.mock(|when, then| {
        when.method(POST).path("/v1/data/frontend/allow");
        then.status(200).body(r#"{"result":{"allow":false}}"#);
    });
    let auth = build_authenticator(&config(StrategyKind::OpaJwtParsed, &server)).unwrap();

    let headers = bearer(&sign(&user_claims(&["__admin"])));
    let identity = auth.authenticate(&meta(&headers)).await.unwrap();
    assert_eq!(identity.permissions(), vec!["realm_access.__admin"]);
    opa.assert_calls(0);
}

#[tokio::test]
async fn opa_parsed_non_admin_is_checked() {
    let server = MockServer::start();
    mock_realm(&server);
    let opa = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/data/frontend/allow")
            .body_includes(r#""preferred_username":"grace""#);
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"result":{"allow":true}}"#);
    });
    let auth = build_authenticator(&config(StrategyKind::OpaJwtParsed, &server)).unwrap();

    let headers = bearer(&sign(&user_claims(&["viewer"])));
    auth.authenticate(&meta(&headers)).await.unwrap();
    opa.assert_calls(1);
}
