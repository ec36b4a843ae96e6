use settings_errors::catalog;
use thiserror::Error;

/// Detail returned when Keycloak cannot be reached.
pub const PROVIDER_UNAVAILABLE: &str = "Token verification service unavailable";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("{0}")]
    InvalidToken(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{PROVIDER_UNAVAILABLE}")]
    ProviderUnavailable,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let def = match self {
            AuthError::Unauthenticated => catalog::UNAUTHORIZED,
            AuthError::InvalidToken(_) | AuthError::Forbidden(_) => catalog::FORBIDDEN,
            AuthError::ProviderUnavailable => catalog::UNAVAILABLE,
            AuthError::Internal(_) => {
                tracing::error!(error = %self, "Authentication failed internally");
                catalog::INTERNAL
            }
        };
        def.as_problem(self.to_string()).into_response()
    }
}
