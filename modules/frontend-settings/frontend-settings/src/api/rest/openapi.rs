use settings_errors::{Problem, ValidationViolation};
use utoipa::OpenApi;

use crate::api::rest::dto::{
    ColorRangeCreateReq, ColorRangeDto, ColorRangeFilterReq, ColorRangePatchReq,
    ColorRangeSummaryDto, ColorRangeView, FilterSetDto, FilterSetListDto, FilterSetPatchReq,
    FilterSetReq, LogElementDto, LogFilterReq, LogMetaDto, LogPageDto,
    LogSortReq, MapColorCreateReq, MapColorDto, MapColorSummaryDto, MapColorUpdateReq,
    ModuleCreateReq, ModuleDto, ModuleSettingsDto, ModuleSettingsUpdateReq, PresetDto, PresetReq,
    PresetSummaryDto, StateCreateReq, UserSettingsDto, UserSettingsReq,
};
use crate::api::rest::handlers::{
    color_range, filter_sets, map_color, module_settings, modules, presets, state,
    user_settings,
};
use crate::domain::model::{Direction, JoinOperator, LogSortField, SortDirection, ValueType};

#[derive(OpenApi)]
#[openapi(
    info(title = "Frontend Settings", description = "Display preferences of the platform frontend"),
    paths(
        color_range::create, color_range::update, color_range::delete,
        color_range::filter, color_range::defaults,
        map_color::default_for, map_color::attributes_with_default, map_color::list,
        map_color::get, map_color::create, map_color::update, map_color::delete,
        presets::table_default, presets::table_list_all, presets::table_list,
        presets::table_create, presets::get, presets::update, presets::delete,
        presets::object_default, presets::object_list, presets::object_create,
        modules::list, modules::rename_many, modules::get, modules::rename,
        modules::create, modules::delete,
        module_settings::list, module_settings::create, module_settings::get,
        module_settings::update, module_settings::delete, module_settings::logs,
        filter_sets::create, filter_sets::list, filter_sets::update_many,
        filter_sets::get, filter_sets::update, filter_sets::delete,
        state::save, state::get,
        user_settings::keys, user_settings::get, user_settings::create,
        user_settings::update, user_settings::delete,
    ),
    components(schemas(
        Problem, ValidationViolation, Direction, ValueType, LogSortField, SortDirection,
        ColorRangeCreateReq, ColorRangePatchReq, ColorRangeFilterReq, ColorRangeDto,
        ColorRangeSummaryDto, ColorRangeView,
        MapColorCreateReq, MapColorUpdateReq, MapColorDto, MapColorSummaryDto,
        PresetReq, PresetDto, PresetSummaryDto,
        ModuleCreateReq, ModuleDto, ModuleSettingsDto, ModuleSettingsUpdateReq,
        LogFilterReq, LogSortReq, LogElementDto, LogMetaDto, LogPageDto,
        JoinOperator, FilterSetReq, FilterSetPatchReq, FilterSetDto, FilterSetListDto,
        StateCreateReq, UserSettingsReq, UserSettingsDto,
    ))
)]
pub struct ApiDoc;

/// OpenAPI document with the paths served under `prefix`.
#[must_use]
pub fn document(prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![utoipa::openapi::Server::new(prefix)]);
    doc
}
