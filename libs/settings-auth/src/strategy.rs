use std::sync::Arc;

use async_trait::async_trait;
use http::{HeaderMap, Method};

use crate::config::{SecurityConfig, StrategyKind};
use crate::errors::AuthError;
use crate::identity::Identity;
use crate::keycloak::{KeycloakAuthenticator, RealmKeyProvider, UserInfoEnricher};
use crate::opa::{OpaAuthenticator, OpaClient, TokenMode};

/// The parts of an inbound request a strategy may look at.
#[derive(Debug, Clone, Copy)]
pub struct RequestMeta<'a> {
    pub method: &'a Method,
    /// Path below the mount point of the API.
    pub path: &'a str,
    /// Mount point the API is nested under, empty at the root.
    pub root_path: &'a str,
    pub headers: &'a HeaderMap,
}

impl<'a> RequestMeta<'a> {
    /// Bearer token from the `Authorization` header, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&'a str> {
        self.headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Resolves the caller of a request.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, request: &RequestMeta<'_>) -> Result<Identity, AuthError>;
}

/// Every request runs as the anonymous administrator.
pub struct DisabledAuthenticator {
    identity: Identity,
}

impl DisabledAuthenticator {
    #[must_use]
    pub fn new(admin_role: &str) -> Self {
        Self {
            identity: Identity::anonymous(admin_role),
        }
    }
}

#[async_trait]
impl Authenticator for DisabledAuthenticator {
    async fn authenticate(&self, _request: &RequestMeta<'_>) -> Result<Identity, AuthError> {
        Ok(self.identity.clone())
    }
}

/// Build the strategy selected by `cfg.strategy`.
///
/// # Errors
/// Returns [`AuthError::Internal`] when an HTTP client cannot be constructed.
pub fn build_authenticator(cfg: &SecurityConfig) -> Result<Arc<dyn Authenticator>, AuthError> {
    let keycloak_http = || http_client(cfg.keycloak.timeout);
    let authenticator: Arc<dyn Authenticator> = match cfg.strategy {
        StrategyKind::Disabled => Arc::new(DisabledAuthenticator::new(&cfg.admin_role)),
        StrategyKind::Keycloak => Arc::new(KeycloakAuthenticator::new(
            RealmKeyProvider::new(keycloak_http()?, cfg.keycloak.realm_url()),
            None,
        )),
        StrategyKind::KeycloakInfo => {
            let http = keycloak_http()?;
            Arc::new(KeycloakAuthenticator::new(
                RealmKeyProvider::new(http.clone(), cfg.keycloak.realm_url()),
                Some(UserInfoEnricher::new(
                    http,
                    cfg.keycloak.userinfo_endpoint(),
                    cfg.userinfo_cache_ttl,
                )),
            ))
        }
        StrategyKind::OpaJwtRaw => Arc::new(OpaAuthenticator::new(
            TokenMode::Raw,
            OpaClient::new(http_client(cfg.opa.timeout)?, cfg.opa.decision_url()),
        )),
        StrategyKind::OpaJwtParsed => Arc::new(OpaAuthenticator::new(
            TokenMode::Verified {
                keys: RealmKeyProvider::new(keycloak_http()?, cfg.keycloak.realm_url()),
                admin_permissions: cfg.admin_permissions.clone(),
            },
            OpaClient::new(http_client(cfg.opa.timeout)?, cfg.opa.decision_url()),
        )),
    };
    tracing::info!(strategy = ?cfg.strategy, "Identity strategy configured");
    Ok(authenticator)
}

fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, AuthError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AuthError::Internal(format!("failed to build HTTP client: {e}")))
}
