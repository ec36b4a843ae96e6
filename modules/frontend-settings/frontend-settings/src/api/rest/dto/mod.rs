//! Wire shapes of the REST API. Field names follow the existing clients:
//! color ranges speak camelCase and accept snake case aliases on input.

mod color_range;
mod filter_set;
mod map_color;
mod module;
mod preset;
mod state;
mod user_settings;

pub use color_range::{
    ColorRangeCreateReq, ColorRangeDto, ColorRangeFilterReq, ColorRangePatchReq,
    ColorRangeSummaryDto, ColorRangeView, DefaultsParams,
};
pub use filter_set::{FilterSetDto, FilterSetListDto, FilterSetPatchReq, FilterSetReq};
pub use map_color::{
    LayerParams, MapColorCreateReq, MapColorDto, MapColorSummaryDto, MapColorUpdateReq,
    MapScopeParams,
};
pub use module::{
    CustomNameParams, LogElementDto, LogFilterReq, LogMetaDto, LogPageDto, LogSortReq,
    ModuleCreateReq, ModuleDto, ModuleSettingsDto, ModuleSettingsUpdateReq,
};
pub use preset::{PresetDto, PresetReq, PresetSummaryDto, TmoParams};
pub use state::StateCreateReq;
pub use user_settings::{UserSettingsDto, UserSettingsReq};

#[cfg(test)]
#[path = "dto_test.rs"]
mod dto_test;
