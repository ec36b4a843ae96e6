use serde::{Deserialize, Serialize};

use crate::proto;

/// A KPI parameter that should receive a palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceInstance {
    pub kpi_id: i64,
    pub preference_name: String,
    pub val_type: String,
}

/// Custom ranges for one KPI; `palette` is a JSON object in text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPalette {
    pub kpi_id: i64,
    pub preference_name: String,
    pub val_type: String,
    pub object_type_id: i64,
    pub palette: String,
}

impl From<proto::PreferenceInstance> for PreferenceInstance {
    fn from(p: proto::PreferenceInstance) -> Self {
        Self {
            kpi_id: p.kpi_id,
            preference_name: p.preference_name,
            val_type: p.val_type,
        }
    }
}

impl From<PreferenceInstance> for proto::PreferenceInstance {
    fn from(p: PreferenceInstance) -> Self {
        Self {
            kpi_id: p.kpi_id,
            preference_name: p.preference_name,
            val_type: p.val_type,
        }
    }
}

impl From<proto::CustomPaletteInstance> for CustomPalette {
    fn from(p: proto::CustomPaletteInstance) -> Self {
        Self {
            kpi_id: p.kpi_id,
            preference_name: p.preference_name,
            val_type: p.val_type,
            object_type_id: p.object_type_id,
            palette: p.palette,
        }
    }
}

impl From<CustomPalette> for proto::CustomPaletteInstance {
    fn from(p: CustomPalette) -> Self {
        Self {
            kpi_id: p.kpi_id,
            preference_name: p.preference_name,
            val_type: p.val_type,
            object_type_id: p.object_type_id,
            palette: p.palette,
        }
    }
}
