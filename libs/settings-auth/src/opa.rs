//! Policy decisions delegated to Open Policy Agent.

use async_trait::async_trait;
use http::uri::Authority;
use http::{HeaderMap, header};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::errors::AuthError;
use crate::identity::Identity;
use crate::keycloak::{RealmKeyProvider, decode_unverified};
use crate::strategy::{Authenticator, RequestMeta};

pub const OPA_UNREACHABLE: &str = "Check authorization server";
pub const OPA_DENIED: &str = "Not allowed";

#[derive(Debug, Deserialize)]
struct Decision {
    result: Option<DecisionResult>,
}

#[derive(Debug, Deserialize)]
struct DecisionResult {
    #[serde(default)]
    allow: bool,
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Host and port the client addressed, from the `Host` header.
fn server_of(headers: &HeaderMap) -> (Option<String>, Option<u16>) {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<Authority>().ok())
        .map_or((None, None), |a| (Some(a.host().to_owned()), a.port_u16()))
}

/// Inbound headers minus the ones describing the inbound body and connection.
fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = headers.clone();
    for name in [
        header::HOST,
        header::CONTENT_LENGTH,
        header::CONTENT_TYPE,
        header::TRANSFER_ENCODING,
        header::CONNECTION,
    ] {
        forwarded.remove(name);
    }
    forwarded
}

pub struct OpaClient {
    http: reqwest::Client,
    decision_url: String,
}

impl OpaClient {
    #[must_use]
    pub fn new(http: reqwest::Client, decision_url: String) -> Self {
        Self { http, decision_url }
    }

    /// Ask the policy whether the request is allowed. The inbound headers
    /// are forwarded with the decision request.
    ///
    /// # Errors
    /// [`AuthError::Forbidden`] when the policy denies or cannot be evaluated.
    pub async fn check(
        &self,
        request: &RequestMeta<'_>,
        jwt: Option<&Value>,
    ) -> Result<(), AuthError> {
        let (server_host, server_port) = server_of(request.headers);
        let mut input = json!({
            "method": request.method.as_str(),
            "server_host": server_host,
            "server_port": server_port,
            "root_path": segments(request.root_path),
            "path": segments(request.path),
        });
        if let Some(jwt) = jwt {
            input["jwt"] = jwt.clone();
        }

        let resp = self
            .http
            .post(&self.decision_url)
            .headers(forwarded_headers(request.headers))
            .json(&json!({ "input": input }))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, url = %self.decision_url, "OPA request failed");
                AuthError::Forbidden(OPA_UNREACHABLE.to_owned())
            })?;
        if resp.status().as_u16() > 300 {
            tracing::warn!(status = %resp.status(), "OPA rejected the decision request");
            return Err(AuthError::Forbidden(OPA_UNREACHABLE.to_owned()));
        }
        let decision: Decision = resp
            .json()
            .await
            .map_err(|_| AuthError::Forbidden(OPA_UNREACHABLE.to_owned()))?;

        if decision.result.is_some_and(|r| r.allow) {
            Ok(())
        } else {
            tracing::debug!(method = %request.method, path = request.path, "OPA denied request");
            Err(AuthError::Forbidden(OPA_DENIED.to_owned()))
        }
    }
}

/// How the bearer token is read before the policy check.
pub enum TokenMode {
    /// Claims are decoded as-is; the policy sees the token only through the
    /// forwarded `Authorization` header.
    Raw,
    /// Claims are verified; holders of an admin permission skip the policy.
    Verified {
        keys: RealmKeyProvider,
        admin_permissions: Vec<String>,
    },
}

/// `opa-jwt-raw` and `opa-jwt-parsed` strategies.
pub struct OpaAuthenticator {
    mode: TokenMode,
    opa: OpaClient,
}

impl OpaAuthenticator {
    #[must_use]
    pub fn new(mode: TokenMode, opa: OpaClient) -> Self {
        Self { mode, opa }
    }
}

#[async_trait]
impl Authenticator for OpaAuthenticator {
    async fn authenticate(&self, request: &RequestMeta<'_>) -> Result<Identity, AuthError> {
        let token = request.bearer_token().ok_or(AuthError::Unauthenticated)?;
        match &self.mode {
            TokenMode::Raw => {
                let claims = decode_unverified(token)?;
                self.opa.check(request, None).await?;
                Ok(Identity::from_claims(&claims))
            }
            TokenMode::Verified {
                keys,
                admin_permissions,
            } => {
                let claims = keys.verify(token).await?;
                let identity = Identity::from_claims(&claims);
                if !identity.has_any_permission(admin_permissions) {
                    self.opa.check(request, Some(&claims)).await?;
                }
                Ok(identity)
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn server_comes_from_the_host_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(server_of(&headers), (None, None));

        headers.insert(header::HOST, "settings.local:8000".parse().unwrap());
        assert_eq!(server_of(&headers), (Some("settings.local".to_owned()), Some(8000)));

        headers.insert(header::HOST, "settings.local".parse().unwrap());
        assert_eq!(server_of(&headers), (Some("settings.local".to_owned()), None));
    }

    #[test]
    fn body_headers_are_not_forwarded() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer t".parse().unwrap());
        headers.insert(header::CONTENT_LENGTH, "12".parse().unwrap());
        headers.insert(header::HOST, "a:1".parse().unwrap());
        headers.insert("x-request-id", "r1".parse().unwrap());

        let forwarded = forwarded_headers(&headers);
        assert_eq!(forwarded.len(), 2);
        assert_eq!(forwarded[header::AUTHORIZATION], "Bearer t");
        assert_eq!(forwarded["x-request-id"], "r1");
    }

    #[test]
    fn paths_split_into_segments() {
        assert_eq!(segments("/api/frontend_settings/v1/"), ["api", "frontend_settings", "v1"]);
        assert!(segments("").is_empty());
    }
}
