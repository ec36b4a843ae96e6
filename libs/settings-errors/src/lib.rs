//! Error responses shared by every HTTP surface of the service.
//!
//! - RFC 9457 Problem Details (`Problem`)
//! - Static error catalog (`ErrDef`, `catalog`)
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod problem;
#[cfg(feature = "axum")]
mod rejection;

pub use catalog::ErrDef;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem, ValidationViolation};

/// Result alias used by REST handlers: any error renders as a problem response.
pub type ApiResult<T> = Result<T, Problem>;

