//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AdminConfig;
use crate::db::{CampaignRepository, DeliveryEventRepository, RegistrationRepository};
use crate::services::CampaignService;

/// The campaign service over its production collaborators.
pub type Campaigns = CampaignService<CampaignRepository, DeliveryEventRepository>;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    campaigns: Campaigns,
    registrations: RegistrationRepository,
}

impl AppState {
    /// Build state from configuration and a connected pool.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        let campaigns = CampaignService::new(
            CampaignRepository::new(pool.clone()),
            DeliveryEventRepository::new(pool.clone()),
            config.stats,
        );
        let registrations = RegistrationRepository::new(pool.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                campaigns,
                registrations,
            }),
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// The shared connection pool (health checks only; repositories hold
    /// their own clones).
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// The campaign service.
    #[must_use]
    pub fn campaigns(&self) -> &Campaigns {
        &self.inner.campaigns
    }

    /// The registration repository.
    #[must_use]
    pub fn registrations(&self) -> &RegistrationRepository {
        &self.inner.registrations
    }
}
