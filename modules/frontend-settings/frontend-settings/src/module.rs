//! Wiring of the frontend settings module: repositories, services, the REST
//! router, the gRPC service and the expiry sweep.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use frontend_settings_sdk::{FrontendSettingsServer, PaletteClient};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use settings_auth::AuthState;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::grpc::PaletteGrpcServer;
use crate::api::rest;
use crate::config::FrontendSettingsConfig;
use crate::domain::local_client::PaletteLocalClient;
use crate::domain::service::{AppServices, Repos};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{
    OrmColorRangesRepository, OrmFilterSetsRepository, OrmMapColorsRepository,
    OrmModuleSettingsRepository, OrmModulesRepository, OrmPresetsRepository,
    SeaOrmStateRepository, SeaOrmUserSettingsRepository,
};
use crate::infra::sweeper::spawn_state_sweeper;

pub type ConcreteAppServices = AppServices<
    OrmColorRangesRepository,
    OrmMapColorsRepository,
    OrmPresetsRepository,
    OrmModulesRepository,
    OrmModuleSettingsRepository,
    OrmFilterSetsRepository,
>;

pub struct FrontendSettingsModule {
    config: FrontendSettingsConfig,
    services: Arc<ConcreteAppServices>,
    palette: Arc<dyn PaletteClient>,
}

impl FrontendSettingsModule {
    /// Applies pending schema migrations.
    ///
    /// # Errors
    /// Propagates migration failures.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running frontend settings database migrations");
        Migrator::up(db, None).await?;
        info!("Frontend settings database migrations completed");
        Ok(())
    }

    #[must_use]
    pub fn new(db: &DatabaseConnection, config: FrontendSettingsConfig) -> Self {
        let repos = Repos {
            color_ranges: Arc::new(OrmColorRangesRepository),
            map_colors: Arc::new(OrmMapColorsRepository),
            presets: Arc::new(OrmPresetsRepository),
            modules: Arc::new(OrmModulesRepository),
            module_settings: Arc::new(OrmModuleSettingsRepository),
            filter_sets: Arc::new(OrmFilterSetsRepository),
            state: Arc::new(SeaOrmStateRepository::new(db.clone())),
            user_settings: Arc::new(SeaOrmUserSettingsRepository::new(db.clone())),
        };
        let services = Arc::new(AppServices::new(db, repos, &config));
        let palette: Arc<dyn PaletteClient> =
            Arc::new(PaletteLocalClient::new(services.palette.clone()));
        info!("Frontend settings module initialized");
        Self {
            config,
            services,
            palette,
        }
    }

    #[must_use]
    pub fn services(&self) -> Arc<ConcreteAppServices> {
        self.services.clone()
    }

    /// In-process palette client for callers sharing the process.
    #[must_use]
    pub fn palette_client(&self) -> Arc<dyn PaletteClient> {
        self.palette.clone()
    }

    /// API routes, relative to the API prefix, behind `auth`.
    #[must_use]
    pub fn rest_router(&self, auth: AuthState) -> Router {
        rest::router(self.services.clone(), auth)
    }

    #[must_use]
    pub fn grpc_service(&self) -> FrontendSettingsServer<PaletteGrpcServer> {
        PaletteGrpcServer::new(self.palette.clone()).into_service()
    }

    #[must_use]
    pub fn spawn_sweeper(&self, cancel: CancellationToken) -> JoinHandle<()> {
        let minutes = u64::from(self.config.state.drop_interval_minutes);
        spawn_state_sweeper(
            self.services.state.clone(),
            Duration::from_secs(minutes * 60),
            cancel,
        )
    }
}
