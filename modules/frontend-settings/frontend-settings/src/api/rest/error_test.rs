#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::http::StatusCode;
use settings_errors::Problem;

use crate::domain::error::DomainError;

#[test]
fn not_found_keeps_the_message() {
    let p: Problem = DomainError::not_found("State not found").into();
    assert_eq!(p.status, StatusCode::NOT_FOUND);
    assert_eq!(p.detail, "State not found");
    assert_eq!(p.code, "FS_NOT_FOUND");
}

#[test]
fn conflict_maps_to_409() {
    let p: Problem = DomainError::conflict("Name [main] already exists").into();
    assert_eq!(p.status, StatusCode::CONFLICT);
    assert_eq!(p.detail, "Name [main] already exists");
}

#[test]
fn bad_request_maps_to_400() {
    let p: Problem = DomainError::bad_request("The query contains non-unique custom names").into();
    assert_eq!(p.status, StatusCode::BAD_REQUEST);
}

#[test]
fn validation_lists_the_field() {
    let p: Problem = DomainError::validation("limit", "Input should be between 1 and 1000").into();
    assert_eq!(p.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(p.detail, "Input should be between 1 and 1000");
    let errors = p.errors.unwrap();
    assert_eq!(errors[0].field, "limit");
}

#[test]
fn database_errors_are_redacted() {
    let p: Problem = DomainError::Database(anyhow::anyhow!("password=hunter2")).into();
    assert_eq!(p.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!p.detail.contains("hunter2"));
}
