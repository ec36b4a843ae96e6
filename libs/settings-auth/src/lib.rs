//! Identity resolution for the frontend settings service.
//!
//! One [`Authenticator`] is selected at startup from [`SecurityConfig`]; the
//! axum middleware in [`axum_ext`] runs it for every request and stores the
//! resulting [`Identity`] in the request extensions.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod axum_ext;
pub mod config;
pub mod errors;
pub mod identity;
pub mod keycloak;
pub mod opa;
pub mod strategy;

pub use axum_ext::{AuthState, Authz, authenticate};
pub use config::{KeycloakConfig, OpaConfig, SecurityConfig, StrategyKind};
pub use errors::AuthError;
pub use identity::Identity;
pub use strategy::{Authenticator, RequestMeta, build_authenticator};
