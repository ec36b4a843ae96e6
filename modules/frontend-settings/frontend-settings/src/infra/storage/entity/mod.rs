pub mod color_range;
pub mod filter_set;
pub mod map_color;
pub mod module;
pub mod module_settings;
pub mod settings_log;
pub mod state;
pub mod table_preset;
pub mod user_settings;
