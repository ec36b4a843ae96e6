//! Repository traits. Implementations live in `infra::storage`.
//!
//! Repositories used inside transactions take the connection per call
//! (`DatabaseConnection` or `DatabaseTransaction`); the simple key/value
//! families own their connection.

mod color_ranges_repo;
mod filter_sets_repo;
mod map_colors_repo;
mod module_settings_repo;
mod modules_repo;
mod presets_repo;
mod state_repo;
mod user_settings_repo;

pub use color_ranges_repo::ColorRangesRepository;
pub use filter_sets_repo::FilterSetsRepository;
pub use map_colors_repo::MapColorsRepository;
pub use module_settings_repo::ModuleSettingsRepository;
pub use modules_repo::ModulesRepository;
pub use presets_repo::PresetsRepository;
pub use state_repo::StateRepository;
pub use user_settings_repo::UserSettingsRepository;
