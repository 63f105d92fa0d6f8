//! Campaign domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_portal_core::{AdminUserId, CampaignId, CampaignStatus, CampaignType, DeliveryEventKind};

/// A persisted email campaign.
///
/// Immutable once sent, except for the status/timestamp fields maintained by
/// the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailCampaign {
    /// Unique campaign ID, assigned by the store.
    pub id: CampaignId,
    /// Display label.
    pub name: String,
    /// Campaign category.
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,
    /// Email subject line.
    pub subject: String,
    /// Rendered email body.
    pub html_content: String,
    /// Lifecycle status.
    pub status: CampaignStatus,
    /// Scheduled send time; present only while `status` is `scheduled`.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Set exactly once, when the campaign is marked sent.
    pub sent_at: Option<DateTime<Utc>>,
    /// Admin who created the campaign, if known.
    pub created_by: Option<AdminUserId>,
    /// When the campaign was created.
    pub created_at: DateTime<Utc>,
    /// Refreshed by the store on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// A not-yet-persisted campaign, as submitted by the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,
    pub subject: String,
    pub html_content: String,
    /// Defaults to `draft` when the caller omits it.
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<AdminUserId>,
}

/// Delivery and engagement counts for one campaign, derived from the event
/// log at query time. Never stored as primary state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignStats {
    pub campaign_id: CampaignId,
    pub sent: u64,
    pub delivered: u64,
    pub opened: u64,
    pub clicked: u64,
    pub bounced: u64,
}

impl CampaignStats {
    /// All-zero stats for a campaign with no recorded events.
    #[must_use]
    pub const fn empty(campaign_id: CampaignId) -> Self {
        Self {
            campaign_id,
            sent: 0,
            delivered: 0,
            opened: 0,
            clicked: 0,
            bounced: 0,
        }
    }

    /// Build stats from grouped event counts.
    ///
    /// Kinds absent from `counts` are zero-filled. The event log is written
    /// by an external collaborator and may be momentarily inconsistent
    /// (e.g. an open recorded before its delivery), so counts are clamped to
    /// keep `opened <= delivered <= sent`, `clicked <= opened`, and
    /// `bounced <= sent` on every returned value.
    #[must_use]
    pub fn from_counts(campaign_id: CampaignId, counts: &[(DeliveryEventKind, i64)]) -> Self {
        let mut stats = Self::empty(campaign_id);
        for &(kind, count) in counts {
            let count = u64::try_from(count).unwrap_or(0);
            match kind {
                DeliveryEventKind::Sent => stats.sent = count,
                DeliveryEventKind::Delivered => stats.delivered = count,
                DeliveryEventKind::Opened => stats.opened = count,
                DeliveryEventKind::Clicked => stats.clicked = count,
                DeliveryEventKind::Bounced => stats.bounced = count,
            }
        }

        stats.delivered = stats.delivered.min(stats.sent);
        stats.opened = stats.opened.min(stats.delivered);
        stats.clicked = stats.clicked.min(stats.opened);
        stats.bounced = stats.bounced.min(stats.sent);
        stats
    }
}

/// Why stats are missing for one campaign in a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsFailureKind {
    /// Event-log collaborator failed.
    Aggregation,
    /// Aggregation did not finish within the configured deadline.
    Timeout,
}

/// Per-campaign stats result inside a list response.
///
/// A failure aggregating one campaign's stats annotates that entry instead of
/// aborting the whole list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StatsOutcome {
    Ready(CampaignStats),
    Failed {
        kind: StatsFailureKind,
        detail: String,
    },
}

impl StatsOutcome {
    /// The stats, if aggregation succeeded.
    #[must_use]
    pub const fn as_ready(&self) -> Option<&CampaignStats> {
        match self {
            Self::Ready(stats) => Some(stats),
            Self::Failed { .. } => None,
        }
    }
}

/// A campaign paired with its stats outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignWithStats {
    pub campaign: EmailCampaign,
    pub stats: StatsOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats_are_all_zero() {
        let stats = CampaignStats::empty(CampaignId::new(1));
        assert_eq!(stats.sent, 0);
        assert_eq!(stats.delivered, 0);
        assert_eq!(stats.opened, 0);
        assert_eq!(stats.clicked, 0);
        assert_eq!(stats.bounced, 0);
    }

    #[test]
    fn test_from_counts_zero_fills_missing_kinds() {
        let stats = CampaignStats::from_counts(
            CampaignId::new(1),
            &[(DeliveryEventKind::Sent, 10), (DeliveryEventKind::Delivered, 8)],
        );
        assert_eq!(stats.sent, 10);
        assert_eq!(stats.delivered, 8);
        assert_eq!(stats.opened, 0);
        assert_eq!(stats.clicked, 0);
        assert_eq!(stats.bounced, 0);
    }

    #[test]
    fn test_from_counts_clamps_inconsistent_logs() {
        let stats = CampaignStats::from_counts(
            CampaignId::new(1),
            &[
                (DeliveryEventKind::Sent, 5),
                (DeliveryEventKind::Delivered, 9),
                (DeliveryEventKind::Opened, 7),
                (DeliveryEventKind::Clicked, 6),
                (DeliveryEventKind::Bounced, 8),
            ],
        );
        assert!(stats.delivered <= stats.sent);
        assert!(stats.opened <= stats.delivered);
        assert!(stats.clicked <= stats.opened);
        assert!(stats.bounced <= stats.sent);
    }

    #[test]
    fn test_from_counts_ignores_negative_counts() {
        let stats =
            CampaignStats::from_counts(CampaignId::new(1), &[(DeliveryEventKind::Sent, -3)]);
        assert_eq!(stats.sent, 0);
    }

    #[test]
    fn test_draft_defaults() {
        let json = r#"{
            "name": "Spring Reminder",
            "type": "reminder",
            "subject": "Don't forget!",
            "html_content": "<p>Hi</p>"
        }"#;
        let draft: CampaignDraft = serde_json::from_str(json).expect("deserialize");
        assert_eq!(draft.status, CampaignStatus::Draft);
        assert!(draft.scheduled_at.is_none());
        assert!(draft.created_by.is_none());
    }

    #[test]
    fn test_unknown_type_rejected_at_the_boundary() {
        let json = r#"{
            "name": "X",
            "type": "carrier-pigeon",
            "subject": "s",
            "html_content": "<p/>"
        }"#;
        assert!(serde_json::from_str::<CampaignDraft>(json).is_err());
    }

    #[test]
    fn test_stats_outcome_serialization() {
        let ready = StatsOutcome::Ready(CampaignStats::empty(CampaignId::new(3)));
        let json = serde_json::to_string(&ready).expect("serialize");
        assert!(json.contains("\"state\":\"ready\""));
        assert!(json.contains("\"campaign_id\":3"));

        let failed = StatsOutcome::Failed {
            kind: StatsFailureKind::Timeout,
            detail: "deadline exceeded".to_string(),
        };
        let json = serde_json::to_string(&failed).expect("serialize");
        assert!(json.contains("\"state\":\"failed\""));
        assert!(json.contains("\"kind\":\"timeout\""));
    }
}
