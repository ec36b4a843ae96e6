//! Frontend Settings Module Implementation
//!
//! The palette API is defined in `frontend-settings-sdk` and re-exported here.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub use frontend_settings_sdk::{
    CustomPalette, FrontendSettingsError, PaletteClient, PreferenceInstance,
};

pub mod module;
pub use module::{ConcreteAppServices, FrontendSettingsModule};

pub mod config;
pub use config::FrontendSettingsConfig;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
pub(crate) mod test_support;
