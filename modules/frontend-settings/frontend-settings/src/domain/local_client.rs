//! Local client implementing the `PaletteClient` trait.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use frontend_settings_sdk::{
    CustomPalette, FrontendSettingsError, PaletteClient, PreferenceInstance,
};

use crate::domain::error::DomainError;
use crate::domain::repos::ColorRangesRepository;
use crate::domain::service::PaletteService;

/// In-process palette client; the gRPC server and local callers both go
/// through it.
pub struct PaletteLocalClient<R: ColorRangesRepository> {
    service: Arc<PaletteService<R>>,
}

impl<R: ColorRangesRepository> PaletteLocalClient<R> {
    #[must_use]
    pub fn new(service: Arc<PaletteService<R>>) -> Self {
        Self { service }
    }
}

fn internal(e: DomainError) -> FrontendSettingsError {
    FrontendSettingsError::Internal(e.to_string())
}

#[async_trait]
impl<R: ColorRangesRepository + 'static> PaletteClient for PaletteLocalClient<R> {
    async fn set_default_palette_for_items(
        &self,
        items: BTreeMap<i64, Vec<PreferenceInstance>>,
    ) -> Result<Vec<i64>, FrontendSettingsError> {
        self.service
            .set_default_palettes(&items)
            .await
            .map_err(internal)
    }

    async fn set_custom_color_range_for_kpi(
        &self,
        items: Vec<CustomPalette>,
    ) -> Result<Vec<i64>, FrontendSettingsError> {
        self.service
            .set_custom_palettes(&items)
            .await
            .map_err(internal)
    }
}
