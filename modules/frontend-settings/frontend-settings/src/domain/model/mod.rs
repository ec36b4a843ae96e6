//! Domain models shared by the services, repositories and the REST layer.

pub mod color_range;
pub mod filter_set;
pub mod map_color;
pub mod module;
pub mod preset;
pub mod state;
pub mod user_settings;

pub use color_range::{
    ColorRange, ColorRangeFilter, ColorRangePatch, ColorRangeScope, DefaultsQuery, Direction,
    NewColorRange, ValueType,
};
pub use filter_set::{FilterSet, FilterSetInput, FilterSetPatch, JoinOperator};
pub use map_color::{MapColor, MapColorScope, MapColorUpdate, NewMapColor};
pub use module::{
    LogFilter, LogSort, LogSortField, Module, ModuleSettings, SettingsLog, SettingsLogPage,
    SortDirection,
};
pub use preset::{Preset, PresetInput, PresetKind, PresetScope};
pub use state::StateBlob;
pub use user_settings::UserSettings;

use super::error::DomainError;

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::validation(
            field,
            "String should have at least 1 character",
        ));
    }
    Ok(())
}
