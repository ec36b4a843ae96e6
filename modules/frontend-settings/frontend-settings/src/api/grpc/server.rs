//! tonic service for the palette facade.

use std::collections::BTreeMap;
use std::sync::Arc;

use frontend_settings_sdk::proto::{RequestObjectForPalette, RequestToSetCustomPalette, WrongKpiIds};
use frontend_settings_sdk::{FrontendSettings, FrontendSettingsError, FrontendSettingsServer, PaletteClient};
use tonic::{Request, Response, Status};
use tracing::{info, instrument};

pub struct PaletteGrpcServer {
    client: Arc<dyn PaletteClient>,
}

impl PaletteGrpcServer {
    #[must_use]
    pub fn new(client: Arc<dyn PaletteClient>) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn into_service(self) -> FrontendSettingsServer<Self> {
        FrontendSettingsServer::new(self)
    }
}

fn to_status(e: FrontendSettingsError) -> Status {
    match e {
        FrontendSettingsError::Unauthorized(msg) => Status::permission_denied(msg),
        FrontendSettingsError::Transport(msg) => Status::unavailable(msg),
        FrontendSettingsError::Internal(msg) => Status::internal(msg),
    }
}

#[tonic::async_trait]
impl FrontendSettings for PaletteGrpcServer {
    #[instrument(skip_all)]
    async fn set_default_palette_for_items(
        &self,
        request: Request<RequestObjectForPalette>,
    ) -> Result<Response<WrongKpiIds>, Status> {
        let items: BTreeMap<i64, _> = request
            .into_inner()
            .tmo_id_preference
            .into_iter()
            .map(|(tmo_id, group)| {
                let instances = group
                    .preference_instances
                    .into_iter()
                    .map(Into::into)
                    .collect();
                (tmo_id, instances)
            })
            .collect();
        info!(object_types = items.len(), "SetDefaultPaletteForItems");

        let wrong_kpi_ids = self
            .client
            .set_default_palette_for_items(items)
            .await
            .map_err(to_status)?;
        Ok(Response::new(WrongKpiIds { wrong_kpi_ids }))
    }

    #[instrument(skip_all)]
    async fn set_custom_color_range_for_kpi(
        &self,
        request: Request<RequestToSetCustomPalette>,
    ) -> Result<Response<WrongKpiIds>, Status> {
        let items: Vec<_> = request
            .into_inner()
            .preference_instances
            .into_iter()
            .map(Into::into)
            .collect();
        info!(count = items.len(), "SetCustomColorRangeForKPI");

        let wrong_kpi_ids = self
            .client
            .set_custom_color_range_for_kpi(items)
            .await
            .map_err(to_status)?;
        Ok(Response::new(WrongKpiIds { wrong_kpi_ids }))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn sdk_errors_map_to_status_codes() {
        assert_eq!(
            to_status(FrontendSettingsError::Internal("db".to_owned())).code(),
            tonic::Code::Internal
        );
        assert_eq!(
            to_status(FrontendSettingsError::Unauthorized("no".to_owned())).code(),
            tonic::Code::PermissionDenied
        );
        assert_eq!(
            to_status(FrontendSettingsError::Transport("down".to_owned())).code(),
            tonic::Code::Unavailable
        );
    }
}
