//! Frontend Settings SDK
//!
//! Everything needed to talk to the palette facade of the service:
//! - API trait (`PaletteClient`) and error type (`FrontendSettingsError`)
//! - Transport-neutral models (`PreferenceInstance`, `CustomPalette`)
//! - gRPC client (`FrontendSettingsGrpcClient`)
//! - Proto stubs for the server implementation

#![deny(rust_2018_idioms)]

mod api;
pub use api::{FrontendSettingsError, PaletteClient};

pub mod models;
pub use models::{CustomPalette, PreferenceInstance};

mod client;
pub use client::FrontendSettingsGrpcClient;

/// Generated protobuf types for the `FrontendSettings` service
pub mod proto {
    tonic::include_proto!("frontend_settings.v1");
}

pub use proto::frontend_settings_server::{FrontendSettings, FrontendSettingsServer};

/// Fully qualified gRPC service name.
pub const SERVICE_NAME: &str = "frontend_settings.v1.FrontendSettings";
