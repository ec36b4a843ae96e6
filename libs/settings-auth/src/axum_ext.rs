//! Axum extractor and middleware for identity resolution

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, OriginalUri, Request, State},
    http::{HeaderMap, Method, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::errors::AuthError;
use crate::identity::Identity;
use crate::strategy::{Authenticator, RequestMeta};

/// Extractor for the caller identity - requires the middleware to have run.
#[derive(Debug, Clone)]
pub struct Authz(pub Identity);

impl<S> FromRequestParts<S> for Authz
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(Authz)
            .ok_or_else(|| {
                AuthError::Internal("Identity not found - auth middleware not configured".to_owned())
            })
    }
}

#[derive(Clone)]
pub struct AuthState {
    authenticator: Arc<dyn Authenticator>,
}

impl AuthState {
    #[must_use]
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }
}

/// Authenticate the request and store the [`Identity`] in its extensions.
///
/// CORS preflight requests pass through untouched.
pub async fn authenticate(
    State(AuthState { authenticator }): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    if is_preflight_request(request.method(), request.headers()) {
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();
    let root_path = parts
        .extensions
        .get::<OriginalUri>()
        .and_then(|original| original.path().strip_suffix(parts.uri.path()))
        .unwrap_or_default()
        .to_owned();
    let meta = RequestMeta {
        method: &parts.method,
        path: parts.uri.path(),
        root_path: &root_path,
        headers: &parts.headers,
    };
    match authenticator.authenticate(&meta).await {
        Ok(identity) => {
            parts.extensions.insert(identity);
            next.run(Request::from_parts(parts, body)).await
        }
        Err(err) => {
            tracing::debug!(error = %err, "Request rejected by identity strategy");
            err.into_response()
        }
    }
}

/// OPTIONS with `Origin` and `Access-Control-Request-Method`.
fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(axum::http::header::ORIGIN)
        && headers.contains_key(axum::http::header::ACCESS_CONTROL_REQUEST_METHOD)
}
