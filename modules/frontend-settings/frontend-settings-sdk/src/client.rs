//! gRPC client implementation of `PaletteClient`

use std::collections::BTreeMap;

use async_trait::async_trait;
use tonic::transport::Channel;

use crate::api::{FrontendSettingsError, PaletteClient};
use crate::models::{CustomPalette, PreferenceInstance};
use crate::proto::frontend_settings_client::FrontendSettingsClient;
use crate::proto::{PreferenceInstances, RequestObjectForPalette, RequestToSetCustomPalette};

/// gRPC-backed `PaletteClient`.
#[derive(Clone)]
pub struct FrontendSettingsGrpcClient {
    inner: FrontendSettingsClient<Channel>,
}

impl FrontendSettingsGrpcClient {
    /// Connect to the service at `uri` (for example `http://frontend-settings:50051`).
    ///
    /// # Errors
    /// Returns [`FrontendSettingsError::Transport`] when the endpoint is unreachable.
    pub async fn connect(uri: impl Into<String>) -> Result<Self, FrontendSettingsError> {
        let uri = uri.into();
        let inner = FrontendSettingsClient::connect(uri.clone())
            .await
            .map_err(|e| FrontendSettingsError::Transport(e.to_string()))?;
        tracing::debug!(%uri, "Frontend settings gRPC client connected");
        Ok(Self { inner })
    }

    #[must_use]
    pub fn from_channel(channel: Channel) -> Self {
        Self {
            inner: FrontendSettingsClient::new(channel),
        }
    }
}

#[async_trait]
impl PaletteClient for FrontendSettingsGrpcClient {
    async fn set_default_palette_for_items(
        &self,
        items: BTreeMap<i64, Vec<PreferenceInstance>>,
    ) -> Result<Vec<i64>, FrontendSettingsError> {
        let mut client = self.inner.clone();
        let request = RequestObjectForPalette {
            tmo_id_preference: items
                .into_iter()
                .map(|(tmo_id, instances)| {
                    let preference_instances = instances.into_iter().map(Into::into).collect();
                    (tmo_id, PreferenceInstances { preference_instances })
                })
                .collect(),
        };
        let response = client.set_default_palette_for_items(request).await?;
        Ok(response.into_inner().wrong_kpi_ids)
    }

    async fn set_custom_color_range_for_kpi(
        &self,
        items: Vec<CustomPalette>,
    ) -> Result<Vec<i64>, FrontendSettingsError> {
        let mut client = self.inner.clone();
        let request = RequestToSetCustomPalette {
            preference_instances: items.into_iter().map(Into::into).collect(),
        };
        let response = client.set_custom_color_range_for_kpi(request).await?;
        Ok(response.into_inner().wrong_kpi_ids)
    }
}
