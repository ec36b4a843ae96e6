//! Infrastructure storage layer: everything SeaORM-specific.
//!
//! - `entity/` - table definitions
//! - `mapper.rs` - conversions between table rows and domain records
//! - `migrations/` - schema, including the partial unique indexes that back
//!   the default slots
//! - `*_sea_repo.rs` - repository implementations

pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;

mod color_ranges_sea_repo;
mod filter_sets_sea_repo;
mod map_colors_sea_repo;
mod module_settings_sea_repo;
mod modules_sea_repo;
mod presets_sea_repo;
mod state_sea_repo;
mod user_settings_sea_repo;

pub use color_ranges_sea_repo::OrmColorRangesRepository;
pub use filter_sets_sea_repo::OrmFilterSetsRepository;
pub use map_colors_sea_repo::OrmMapColorsRepository;
pub use module_settings_sea_repo::OrmModuleSettingsRepository;
pub use modules_sea_repo::OrmModulesRepository;
pub use presets_sea_repo::OrmPresetsRepository;
pub use state_sea_repo::SeaOrmStateRepository;
pub use user_settings_sea_repo::SeaOrmUserSettingsRepository;
