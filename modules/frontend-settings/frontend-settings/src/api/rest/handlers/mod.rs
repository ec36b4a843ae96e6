//! Thin axum handlers: extract, call the service, map the result.

pub mod color_range;
pub mod filter_sets;
pub mod map_color;
pub mod module_settings;
pub mod modules;
pub mod presets;
pub mod state;
pub mod user_settings;
