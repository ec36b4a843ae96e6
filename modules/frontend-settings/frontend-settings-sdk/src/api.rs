use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::models::{CustomPalette, PreferenceInstance};

/// Palette provisioning for KPI parameters.
///
/// Both operations are best effort per item: they return the KPI ids that
/// could not be applied instead of failing the whole batch.
#[async_trait]
pub trait PaletteClient: Send + Sync {
    /// Create the default system palette for each KPI, keyed by object type id.
    async fn set_default_palette_for_items(
        &self,
        items: BTreeMap<i64, Vec<PreferenceInstance>>,
    ) -> Result<Vec<i64>, FrontendSettingsError>;

    /// Create or replace the ranges of each KPI's system palette.
    async fn set_custom_color_range_for_kpi(
        &self,
        items: Vec<CustomPalette>,
    ) -> Result<Vec<i64>, FrontendSettingsError>;
}

#[derive(thiserror::Error, Debug)]
pub enum FrontendSettingsError {
    #[error("gRPC transport error: {0}")]
    Transport(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),
}

impl From<tonic::Status> for FrontendSettingsError {
    fn from(status: tonic::Status) -> Self {
        match status.code() {
            tonic::Code::Unauthenticated | tonic::Code::PermissionDenied => {
                Self::Unauthorized(status.message().to_owned())
            }
            tonic::Code::Internal => Self::Internal(status.message().to_owned()),
            _ => Self::Transport(status.message().to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_error_classes() {
        assert!(matches!(
            FrontendSettingsError::from(tonic::Status::unauthenticated("no token")),
            FrontendSettingsError::Unauthorized(_)
        ));
        assert!(matches!(
            FrontendSettingsError::from(tonic::Status::internal("db down")),
            FrontendSettingsError::Internal(_)
        ));
        assert!(matches!(
            FrontendSettingsError::from(tonic::Status::unavailable("conn refused")),
            FrontendSettingsError::Transport(_)
        ));
    }
}
