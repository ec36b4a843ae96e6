//! Domain services. Each family gets one service; [`AppServices`] bundles
//! them for the REST and gRPC layers.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::FrontendSettingsConfig;
use crate::domain::repos::{
    ColorRangesRepository, FilterSetsRepository, MapColorsRepository, ModuleSettingsRepository,
    ModulesRepository, PresetsRepository, StateRepository, UserSettingsRepository,
};

mod color_ranges;
mod filter_sets;
mod map_colors;
mod module_settings;
mod modules;
mod palette;
mod presets;
mod state;
mod user_settings;

pub use color_ranges::{ColorRangesService, MISSING_SEARCH_PARAMETER};
pub use filter_sets::FilterSetsService;
pub use map_colors::MapColorsService;
pub use module_settings::{DATE_RANGE_INVERTED, ModuleSettingsService};
pub use modules::{ModuleNames, ModulesService, NON_UNIQUE_CUSTOM_NAMES};
pub use palette::PaletteService;
pub use presets::{PresetsService, SETTING_NOT_FOUND, SETTINGS_NOT_FOUND};
pub use state::{STATE_NOT_FOUND, StateService};
pub use user_settings::{USER_SETTINGS_EXIST, USER_SETTINGS_NOT_FOUND, UserSettingsService};

/// Record is missing, or the caller may neither see nor touch it.
pub const NOT_VISIBLE: &str = "Does not exist or action not allowed";
pub const DEFAULT_NOT_SET: &str = "Default value not set yet";

/// Repositories the services are built from.
pub struct Repos<CR, MR, PR, MoR, MsR, FR> {
    pub color_ranges: Arc<CR>,
    pub map_colors: Arc<MR>,
    pub presets: Arc<PR>,
    pub modules: Arc<MoR>,
    pub module_settings: Arc<MsR>,
    pub filter_sets: Arc<FR>,
    pub state: Arc<dyn StateRepository>,
    pub user_settings: Arc<dyn UserSettingsRepository>,
}

pub struct AppServices<CR, MR, PR, MoR, MsR, FR>
where
    CR: ColorRangesRepository,
    MR: MapColorsRepository,
    PR: PresetsRepository,
    MoR: ModulesRepository,
    MsR: ModuleSettingsRepository,
    FR: FilterSetsRepository,
{
    pub color_ranges: Arc<ColorRangesService<CR>>,
    pub map_colors: Arc<MapColorsService<MR>>,
    pub presets: Arc<PresetsService<PR>>,
    pub modules: Arc<ModulesService<MoR>>,
    pub module_settings: Arc<ModuleSettingsService<MoR, MsR>>,
    pub filter_sets: Arc<FilterSetsService<FR>>,
    pub state: Arc<StateService>,
    pub user_settings: Arc<UserSettingsService>,
    pub palette: Arc<PaletteService<CR>>,
}

impl<CR, MR, PR, MoR, MsR, FR> AppServices<CR, MR, PR, MoR, MsR, FR>
where
    CR: ColorRangesRepository,
    MR: MapColorsRepository,
    PR: PresetsRepository,
    MoR: ModulesRepository,
    MsR: ModuleSettingsRepository,
    FR: FilterSetsRepository,
{
    #[must_use]
    pub fn new(
        db: &DatabaseConnection,
        repos: Repos<CR, MR, PR, MoR, MsR, FR>,
        config: &FrontendSettingsConfig,
    ) -> Self {
        Self {
            color_ranges: Arc::new(ColorRangesService::new(
                db.clone(),
                repos.color_ranges.clone(),
                config.color_range.filter_max_limit,
            )),
            map_colors: Arc::new(MapColorsService::new(db.clone(), repos.map_colors)),
            presets: Arc::new(PresetsService::new(db.clone(), repos.presets)),
            modules: Arc::new(ModulesService::new(db.clone(), repos.modules.clone())),
            module_settings: Arc::new(ModuleSettingsService::new(
                db.clone(),
                repos.modules,
                repos.module_settings,
                config.module_settings.items_limit_in_query,
            )),
            filter_sets: Arc::new(FilterSetsService::new(db.clone(), repos.filter_sets)),
            state: Arc::new(StateService::new(repos.state, config.state.clone())),
            user_settings: Arc::new(UserSettingsService::new(repos.user_settings)),
            palette: Arc::new(PaletteService::new(db.clone(), repos.color_ranges)),
        }
    }
}

impl<CR, MR, PR, MoR, MsR, FR> Clone for AppServices<CR, MR, PR, MoR, MsR, FR>
where
    CR: ColorRangesRepository,
    MR: MapColorsRepository,
    PR: PresetsRepository,
    MoR: ModulesRepository,
    MsR: ModuleSettingsRepository,
    FR: FilterSetsRepository,
{
    fn clone(&self) -> Self {
        Self {
            color_ranges: self.color_ranges.clone(),
            map_colors: self.map_colors.clone(),
            presets: self.presets.clone(),
            modules: self.modules.clone(),
            module_settings: self.module_settings.clone(),
            filter_sets: self.filter_sets.clone(),
            state: self.state.clone(),
            user_settings: self.user_settings.clone(),
            palette: self.palette.clone(),
        }
    }
}
