//! Read-only access to the delivery-event log.
//!
//! Events are appended by the delivery-tracking collaborator; this service
//! only groups and counts them per campaign.

use async_trait::async_trait;
use sqlx::PgPool;

use campus_portal_core::{CampaignId, DeliveryEventKind};

use super::RepositoryError;
use crate::services::campaigns::EventLog;

/// Internal row type for grouped event counts.
#[derive(Debug, sqlx::FromRow)]
struct EventCountRow {
    kind: DeliveryEventKind,
    count: i64,
}

/// Repository for delivery-event queries.
#[derive(Clone)]
pub struct DeliveryEventRepository {
    pool: PgPool,
}

impl DeliveryEventRepository {
    /// Create a new delivery-event repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventLog for DeliveryEventRepository {
    /// Count events for one campaign, grouped by kind.
    ///
    /// A campaign with no events yields an empty vec, not an error.
    async fn count_by_kind(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<(DeliveryEventKind, i64)>, RepositoryError> {
        let rows = sqlx::query_as::<_, EventCountRow>(
            "SELECT kind, COUNT(*) AS count \
             FROM delivery_event \
             WHERE campaign_id = $1 \
             GROUP BY kind",
        )
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| (r.kind, r.count)).collect())
    }
}
