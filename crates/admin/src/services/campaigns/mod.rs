//! Campaign service: validation, persistence orchestration, and the
//! per-campaign stats fan-out.
//!
//! The service is the only component with a contract consumed by the HTTP
//! boundary. Collaborators (store, event log, clock) are injected so the
//! lifecycle rules stay testable without a database.

mod validator;

pub use validator::{ValidationError, validate};

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use tracing::{instrument, warn};

use campus_portal_core::{CampaignId, CampaignStatus, DeliveryEventKind};

use crate::config::StatsConfig;
use crate::db::RepositoryError;
use crate::error::AppError;
use crate::models::{
    CampaignDraft, CampaignStats, CampaignWithStats, EmailCampaign, StatsFailureKind, StatsOutcome,
};

/// Persistence contract for campaigns. The implementation is the single
/// writer for campaign rows.
#[async_trait]
pub trait CampaignStore: Send + Sync {
    /// Persist a draft, assigning `id`, `created_at`, and `updated_at`.
    async fn create(&self, draft: &CampaignDraft) -> Result<EmailCampaign, RepositoryError>;

    /// All campaigns, ordered by `created_at` descending.
    async fn list(&self) -> Result<Vec<EmailCampaign>, RepositoryError>;

    /// Fetch one campaign, `NotFound` if absent.
    async fn get_by_id(&self, id: CampaignId) -> Result<EmailCampaign, RepositoryError>;

    /// Apply a monotonic status transition, serializing writes per id.
    async fn update_status(
        &self,
        id: CampaignId,
        next: CampaignStatus,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<EmailCampaign, RepositoryError>;
}

/// Read-only view of the delivery-event log, keyed by campaign id.
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Event counts for one campaign, grouped by kind. Campaigns without
    /// events yield an empty vec.
    async fn count_by_kind(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<(DeliveryEventKind, i64)>, RepositoryError>;
}

/// Injected time source, so validation is deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Orchestrates validation, persistence, and stats enrichment for campaigns.
pub struct CampaignService<S, E> {
    store: S,
    events: E,
    clock: Arc<dyn Clock>,
    stats: StatsConfig,
}

impl<S, E> CampaignService<S, E>
where
    S: CampaignStore,
    E: EventLog,
{
    /// Create a service over the given collaborators, using wall-clock time.
    pub fn new(store: S, events: E, stats: StatsConfig) -> Self {
        Self::with_clock(store, events, stats, Arc::new(SystemClock))
    }

    /// Create a service with an explicit time source.
    pub fn with_clock(store: S, events: E, stats: StatsConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            events,
            clock,
            stats,
        }
    }

    /// Validate and persist a new campaign.
    ///
    /// Validation failures are returned unwrapped so the caller can render
    /// the specific reason; the store is never touched for an invalid draft.
    ///
    /// # Errors
    ///
    /// `AppError::Validation` for a bad draft, `AppError::Database` on a
    /// storage failure.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: CampaignDraft) -> Result<EmailCampaign, AppError> {
        validate(&draft, self.clock.now())?;
        Ok(self.store.create(&draft).await?)
    }

    /// List all campaigns, each enriched with its stats.
    ///
    /// Aggregations run concurrently, capped at `stats.concurrency` in
    /// flight, with a per-campaign deadline. Results come back in the
    /// store's list order regardless of completion order, and one campaign's
    /// aggregation failure annotates that entry instead of failing the call.
    ///
    /// # Errors
    ///
    /// `AppError::Database` only when the campaign list itself cannot be
    /// loaded.
    #[instrument(skip(self))]
    pub async fn list_with_stats(&self) -> Result<Vec<CampaignWithStats>, AppError> {
        let campaigns = self.store.list().await?;

        let enriched = futures::stream::iter(campaigns)
            .map(|campaign| async move {
                let stats = self.stats_outcome(campaign.id).await;
                CampaignWithStats { campaign, stats }
            })
            .buffered(self.stats.concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

        Ok(enriched)
    }

    /// Fetch a single campaign with its stats.
    ///
    /// # Errors
    ///
    /// `AppError::NotFound` if the campaign does not exist.
    #[instrument(skip(self))]
    pub async fn get_with_stats(&self, id: CampaignId) -> Result<CampaignWithStats, AppError> {
        let campaign = self.store.get_by_id(id).await?;
        let stats = self.stats_outcome(campaign.id).await;
        Ok(CampaignWithStats { campaign, stats })
    }

    /// Compute stats for one campaign directly, without the deadline.
    ///
    /// Pure function of the event log at query time: repeated calls with an
    /// unchanged log return identical results.
    ///
    /// # Errors
    ///
    /// `AppError::Database` on an event-log failure.
    pub async fn compute_stats(&self, id: CampaignId) -> Result<CampaignStats, AppError> {
        let counts = self.events.count_by_kind(id).await?;
        Ok(CampaignStats::from_counts(id, &counts))
    }

    /// Apply an externally requested status transition.
    ///
    /// Non-monotonic transitions are rejected here; the store repeats the
    /// check under a row lock to close the race window. Scheduling requires
    /// a strictly-future timestamp; any other target status drops it.
    ///
    /// # Errors
    ///
    /// `AppError::InvalidTransition`, `AppError::Validation` for a bad
    /// schedule, or `AppError::NotFound`.
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        id: CampaignId,
        next: CampaignStatus,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<EmailCampaign, AppError> {
        let current = self.store.get_by_id(id).await?;

        if !current.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }

        let scheduled_at = match next {
            CampaignStatus::Scheduled => match scheduled_at {
                Some(at) if at > self.clock.now() => Some(at),
                _ => return Err(AppError::Validation(ValidationError::InvalidSchedule)),
            },
            CampaignStatus::Draft | CampaignStatus::Sent => None,
        };

        Ok(self.store.update_status(id, next, scheduled_at).await?)
    }

    /// Aggregate one campaign's stats under the configured deadline,
    /// degrading to a tagged failure marker instead of propagating.
    async fn stats_outcome(&self, id: CampaignId) -> StatsOutcome {
        match tokio::time::timeout(self.stats.timeout, self.events.count_by_kind(id)).await {
            Ok(Ok(counts)) => StatsOutcome::Ready(CampaignStats::from_counts(id, &counts)),
            Ok(Err(err)) => {
                warn!(campaign_id = %id, error = %err, "stats aggregation failed");
                StatsOutcome::Failed {
                    kind: StatsFailureKind::Aggregation,
                    detail: err.to_string(),
                }
            }
            Err(_) => {
                warn!(campaign_id = %id, timeout = ?self.stats.timeout, "stats aggregation timed out");
                StatsOutcome::Failed {
                    kind: StatsFailureKind::Timeout,
                    detail: format!("aggregation exceeded {:?}", self.stats.timeout),
                }
            }
        }
    }
}
