use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Identity strategy selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Every caller is the anonymous administrator.
    #[default]
    Disabled,
    /// Bearer JWT verified against the realm public key.
    Keycloak,
    /// As `Keycloak`, enriched with the userinfo document.
    KeycloakInfo,
    /// JWT decoded without verification, then checked by OPA.
    OpaJwtRaw,
    /// Verified JWT; administrators bypass OPA, everyone else is checked.
    OpaJwtParsed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecurityConfig {
    pub strategy: StrategyKind,
    pub keycloak: KeycloakConfig,
    pub opa: OpaConfig,
    /// How long a userinfo document stays cached per token.
    #[serde(with = "humantime_serde")]
    pub userinfo_cache_ttl: Duration,
    /// Realm role granted to the anonymous identity when auth is disabled.
    pub admin_role: String,
    /// Permissions (`realm_access.<role>` or `<client>.<role>`) that skip the OPA check.
    pub admin_permissions: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Disabled,
            keycloak: KeycloakConfig::default(),
            opa: OpaConfig::default(),
            userinfo_cache_ttl: Duration::from_secs(300),
            admin_role: "__admin".to_owned(),
            admin_permissions: vec!["realm_access.__admin".to_owned()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeycloakConfig {
    pub url: String,
    pub realm: String,
    /// Overrides the realm's `protocol/openid-connect/userinfo` endpoint.
    pub userinfo_url: Option<String>,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for KeycloakConfig {
    fn default() -> Self {
        Self {
            url: "http://keycloak:8080".to_owned(),
            realm: "master".to_owned(),
            userinfo_url: None,
            timeout: Duration::from_secs(5),
        }
    }
}

impl KeycloakConfig {
    #[must_use]
    pub fn realm_url(&self) -> String {
        format!("{}/realms/{}", self.url.trim_end_matches('/'), self.realm)
    }

    #[must_use]
    pub fn userinfo_endpoint(&self) -> String {
        self.userinfo_url.clone().unwrap_or_else(|| {
            format!("{}/protocol/openid-connect/userinfo", self.realm_url())
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OpaConfig {
    pub url: String,
    pub policy: String,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for OpaConfig {
    fn default() -> Self {
        Self {
            url: "http://opa:8181".to_owned(),
            policy: "main".to_owned(),
            timeout: Duration::from_secs(1),
        }
    }
}

impl OpaConfig {
    #[must_use]
    pub fn decision_url(&self) -> String {
        format!(
            "{}/v1/data/{}",
            self.url.trim_end_matches('/'),
            self.policy.trim_matches('/')
        )
    }
}
