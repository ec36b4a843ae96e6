//! Keycloak-backed token verification.

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use dashmap::DashMap;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AuthError;
use crate::identity::Identity;
use crate::strategy::{Authenticator, RequestMeta};

/// Cached entries above this size trigger a sweep of expired ones.
const USERINFO_CACHE_SOFT_LIMIT: usize = 10_000;

#[derive(Debug, Deserialize)]
struct RealmInfo {
    public_key: String,
}

/// Fetches the realm RSA key once and serves it lock-free afterwards.
pub struct RealmKeyProvider {
    http: reqwest::Client,
    realm_url: String,
    key: ArcSwapOption<DecodingKey>,
}

impl RealmKeyProvider {
    #[must_use]
    pub fn new(http: reqwest::Client, realm_url: String) -> Self {
        Self {
            http,
            realm_url,
            key: ArcSwapOption::empty(),
        }
    }

    /// # Errors
    /// [`AuthError::ProviderUnavailable`] when the realm cannot be fetched.
    pub async fn decoding_key(&self) -> Result<Arc<DecodingKey>, AuthError> {
        if let Some(key) = self.key.load_full() {
            return Ok(key);
        }
        let key = Arc::new(self.fetch().await?);
        self.key.store(Some(Arc::clone(&key)));
        Ok(key)
    }

    async fn fetch(&self) -> Result<DecodingKey, AuthError> {
        let resp = self.http.get(&self.realm_url).send().await.map_err(|e| {
            tracing::warn!(error = %e, url = %self.realm_url, "Realm key fetch failed");
            AuthError::ProviderUnavailable
        })?;
        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), url = %self.realm_url, "Realm key fetch rejected");
            return Err(AuthError::ProviderUnavailable);
        }
        let realm: RealmInfo = resp.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Realm document is malformed");
            AuthError::ProviderUnavailable
        })?;
        DecodingKey::from_rsa_pem(wrap_public_key(&realm.public_key).as_bytes())
            .map_err(|e| AuthError::Internal(format!("invalid realm public key: {e}")))
    }

    /// Verify `token` with the realm key.
    ///
    /// # Errors
    /// [`AuthError::InvalidToken`] for bad signatures, malformed or expired tokens.
    pub async fn verify(&self, token: &str) -> Result<Value, AuthError> {
        let key = self.decoding_key().await?;
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_aud = false;
        validation.validate_exp = true;
        decode::<Value>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

/// Decode claims without checking signature or expiry.
///
/// # Errors
/// [`AuthError::InvalidToken`] when the token is not a JWT.
pub fn decode_unverified(token: &str) -> Result<Value, AuthError> {
    jsonwebtoken::dangerous::insecure_decode::<Value>(token)
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

/// Keycloak publishes the bare base64 SPKI; PEM wants headers and 64-column lines.
fn wrap_public_key(raw: &str) -> String {
    let body = raw
        .trim()
        .as_bytes()
        .chunks(64)
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join("\n");
    format!("-----BEGIN PUBLIC KEY-----\n{body}\n-----END PUBLIC KEY-----\n")
}

struct CachedUserInfo {
    fetched_at: Instant,
    document: Value,
}

/// Fetches the userinfo document for a token and caches it per token.
pub struct UserInfoEnricher {
    http: reqwest::Client,
    url: String,
    ttl: Duration,
    cache: DashMap<String, CachedUserInfo>,
}

impl UserInfoEnricher {
    #[must_use]
    pub fn new(http: reqwest::Client, url: String, ttl: Duration) -> Self {
        Self {
            http,
            url,
            ttl,
            cache: DashMap::new(),
        }
    }

    /// # Errors
    /// [`AuthError::ProviderUnavailable`] when the userinfo endpoint fails.
    pub async fn userinfo(&self, token: &str) -> Result<Value, AuthError> {
        if let Some(hit) = self.cache.get(token)
            && hit.fetched_at.elapsed() < self.ttl
        {
            return Ok(hit.document.clone());
        }

        let resp = self
            .http
            .get(&self.url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, url = %self.url, "Userinfo request failed");
                AuthError::ProviderUnavailable
            })?;
        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), "Userinfo request rejected");
            return Err(AuthError::ProviderUnavailable);
        }
        let document: Value = resp.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Userinfo document is malformed");
            AuthError::ProviderUnavailable
        })?;

        if self.cache.len() >= USERINFO_CACHE_SOFT_LIMIT {
            self.cache.retain(|_, v| v.fetched_at.elapsed() < self.ttl);
        }
        self.cache.insert(
            token.to_owned(),
            CachedUserInfo {
                fetched_at: Instant::now(),
                document: document.clone(),
            },
        );
        Ok(document)
    }
}

/// `keycloak` and `keycloak-info` strategies.
pub struct KeycloakAuthenticator {
    keys: RealmKeyProvider,
    userinfo: Option<UserInfoEnricher>,
}

impl KeycloakAuthenticator {
    #[must_use]
    pub fn new(keys: RealmKeyProvider, userinfo: Option<UserInfoEnricher>) -> Self {
        Self { keys, userinfo }
    }
}

#[async_trait]
impl Authenticator for KeycloakAuthenticator {
    async fn authenticate(&self, request: &RequestMeta<'_>) -> Result<Identity, AuthError> {
        let token = request.bearer_token().ok_or(AuthError::Unauthenticated)?;
        let mut claims = self.keys.verify(token).await?;

        if let Some(enricher) = &self.userinfo {
            let info = enricher.userinfo(token).await?;
            if let (Some(target), Value::Object(extra)) = (claims.as_object_mut(), info) {
                target.extend(extra);
            }
        }

        Ok(Identity::from_claims(&claims))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn public_key_is_wrapped_in_pem_lines() {
        let raw = "A".repeat(130);
        let pem = wrap_public_key(&raw);
        let lines: Vec<&str> = pem.lines().collect();
        assert_eq!(lines[0], "-----BEGIN PUBLIC KEY-----");
        assert_eq!(lines[1].len(), 64);
        assert_eq!(lines[2].len(), 64);
        assert_eq!(lines[3].len(), 2);
        assert_eq!(lines[4], "-----END PUBLIC KEY-----");
    }

    #[test]
    fn garbage_token_is_rejected_without_verification() {
        assert!(matches!(
            decode_unverified("not-a-jwt"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn rs256_claims_decode_without_the_realm_key() {
        let token = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIzZjFkIn0.c2ln";
        let claims = decode_unverified(token).unwrap();
        assert_eq!(claims["sub"], "3f1d");
    }
}
