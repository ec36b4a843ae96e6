//! Problem Details body (RFC 9457) shared by every error response.

use http::StatusCode;
use serde::{Serialize, Serializer};

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn status_as_u16<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}

/// Error body of the service. Clients match on `detail`, so those strings
/// stay stable across releases; `code` and `type` come from the catalog.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[must_use]
pub struct Problem {
    #[serde(rename = "type")]
    pub type_url: String,
    pub title: String,
    #[serde(serialize_with = "status_as_u16")]
    #[cfg_attr(feature = "utoipa", schema(value_type = u16))]
    pub status: StatusCode,
    pub detail: String,
    pub code: String,
    /// Id of the span the error was raised in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ValidationViolation>>,
}

/// One rejected input field.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct ValidationViolation {
    /// e.g. `ranges` or `sort_by.0.sort_by`
    pub field: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Problem {
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<ValidationViolation>) -> Self {
        self.errors = Some(errors);
        self
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Problem {
    fn into_response(self) -> axum::response::Response {
        let status = self.status;
        let mut resp = axum::Json(self).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
        );
        resp
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::catalog::{CONFLICT, NOT_FOUND, VALIDATION};

    #[test]
    fn body_carries_numeric_status_and_catalog_code() {
        let json = serde_json::to_value(CONFLICT.as_problem("Name [main] already exists")).unwrap();
        assert_eq!(json["status"], 409);
        assert_eq!(json["code"], "FS_CONFLICT");
        assert_eq!(json["type"], "urn:frontend-settings:error:conflict");
        assert_eq!(json["detail"], "Name [main] already exists");
        assert!(json.get("errors").is_none());
        assert!(json.get("trace_id").is_none());
    }

    #[test]
    fn violations_and_trace_id_are_attached() {
        let json = serde_json::to_value(
            VALIDATION
                .as_problem("Limit exceeded. Maximum allowable value 10080")
                .with_trace_id("42")
                .with_errors(vec![ValidationViolation {
                    field: "expires_in_minutes".to_owned(),
                    message: "Limit exceeded. Maximum allowable value 10080".to_owned(),
                    code: None,
                }]),
        )
        .unwrap();
        assert_eq!(json["trace_id"], "42");
        assert_eq!(json["errors"][0]["field"], "expires_in_minutes");
        assert!(json["errors"][0].get("code").is_none());
    }

    #[cfg(feature = "axum")]
    #[test]
    fn response_uses_problem_content_type() {
        use axum::response::IntoResponse;

        let resp = NOT_FOUND.as_problem("Setting not found").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers()[http::header::CONTENT_TYPE],
            APPLICATION_PROBLEM_JSON
        );
    }
}
