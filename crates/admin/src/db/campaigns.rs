//! Database operations for email campaigns.
//!
//! The repository is the single writer for campaign rows. Status mutations
//! run inside a row-locking transaction so there is at most one in-flight
//! mutation per campaign id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use campus_portal_core::{AdminUserId, CampaignId, CampaignStatus, CampaignType};

use super::RepositoryError;
use crate::models::{CampaignDraft, EmailCampaign};
use crate::services::campaigns::CampaignStore;

const CAMPAIGN_COLUMNS: &str = "id, name, campaign_type, subject, html_content, status, \
                                scheduled_at, sent_at, created_by, created_at, updated_at";

/// Internal row type for `PostgreSQL` campaign queries.
#[derive(Debug, sqlx::FromRow)]
struct CampaignRow {
    id: CampaignId,
    name: String,
    campaign_type: CampaignType,
    subject: String,
    html_content: String,
    status: CampaignStatus,
    scheduled_at: Option<DateTime<Utc>>,
    sent_at: Option<DateTime<Utc>>,
    created_by: Option<AdminUserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CampaignRow> for EmailCampaign {
    fn from(row: CampaignRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            campaign_type: row.campaign_type,
            subject: row.subject,
            html_content: row.html_content,
            status: row.status,
            scheduled_at: row.scheduled_at,
            sent_at: row.sent_at,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for campaign database operations.
#[derive(Clone)]
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    /// Create a new campaign repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CampaignStore for CampaignRepository {
    /// Persist a validated draft, assigning id and timestamps.
    async fn create(&self, draft: &CampaignDraft) -> Result<EmailCampaign, RepositoryError> {
        let sql = format!(
            "INSERT INTO campaign \
                 (name, campaign_type, subject, html_content, status, scheduled_at, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {CAMPAIGN_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(&draft.name)
            .bind(draft.campaign_type)
            .bind(&draft.subject)
            .bind(&draft.html_content)
            .bind(draft.status)
            .bind(draft.scheduled_at)
            .bind(draft.created_by)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    /// List all campaigns, most recently created first.
    async fn list(&self) -> Result<Vec<EmailCampaign>, RepositoryError> {
        let sql = format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM campaign ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, CampaignRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Fetch a single campaign.
    async fn get_by_id(&self, id: CampaignId) -> Result<EmailCampaign, RepositoryError> {
        let sql = format!("SELECT {CAMPAIGN_COLUMNS} FROM campaign WHERE id = $1");
        let row = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }

    /// Apply a status transition.
    ///
    /// The current row is locked for the duration of the transaction, and
    /// the monotonicity check is repeated against the locked row, so a racing
    /// mutation on the same id surfaces as `Conflict` instead of a lost
    /// update. `sent_at` is written at most once; `updated_at` always.
    async fn update_status(
        &self,
        id: CampaignId,
        next: CampaignStatus,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<EmailCampaign, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current: Option<(CampaignStatus,)> =
            sqlx::query_as("SELECT status FROM campaign WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((current,)) = current else {
            return Err(RepositoryError::NotFound);
        };

        if !current.can_transition_to(next) {
            return Err(RepositoryError::Conflict(format!(
                "campaign {id} is {current}, cannot become {next}"
            )));
        }

        let sql = format!(
            "UPDATE campaign \
             SET status = $2, \
                 scheduled_at = $3, \
                 sent_at = CASE WHEN $2 = 'sent'::campaign_status \
                                THEN COALESCE(sent_at, now()) ELSE sent_at END, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {CAMPAIGN_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CampaignRow>(&sql)
            .bind(id)
            .bind(next)
            .bind(scheduled_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row.into())
    }
}
