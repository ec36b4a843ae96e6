//! axum extractor rejections rendered as problems.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use http::StatusCode;

use crate::catalog::{BAD_REQUEST, VALIDATION};
use crate::problem::Problem;

/// Shape errors are 422; everything else keeps the rejection's status under
/// the bad-request code.
fn from_rejection(status: StatusCode, detail: String) -> Problem {
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        VALIDATION.as_problem(detail)
    } else {
        let mut problem = BAD_REQUEST.as_problem(detail);
        problem.status = status;
        if let Some(reason) = status.canonical_reason() {
            reason.clone_into(&mut problem.title);
        }
        problem
    }
}

impl From<JsonRejection> for Problem {
    fn from(rejection: JsonRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for Problem {
    fn from(rejection: QueryRejection) -> Self {
        VALIDATION.as_problem(rejection.body_text())
    }
}

impl From<PathRejection> for Problem {
    fn from(rejection: PathRejection) -> Self {
        from_rejection(rejection.status(), rejection.body_text())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn unprocessable_rejections_use_validation_code() {
        let p = from_rejection(StatusCode::UNPROCESSABLE_ENTITY, "missing field `name`".to_owned());
        assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(p.code, VALIDATION.code);
    }

    #[test]
    fn other_rejections_keep_their_status() {
        let p = from_rejection(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Expected json".to_owned());
        assert_eq!(p.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(p.code, BAD_REQUEST.code);
    }
}
