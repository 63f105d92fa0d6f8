//! Status and category enums for campaign entities.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an email campaign.
///
/// Transitions are monotonic: `draft -> scheduled -> sent` or `draft -> sent`.
/// There is no backward transition; once sent, a campaign is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "campaign_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Scheduled,
    Sent,
}

impl CampaignStatus {
    /// Whether moving from `self` to `next` is a legal (monotonic) transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Scheduled | Self::Sent) | (Self::Scheduled, Self::Sent)
        )
    }

    /// Get a human-readable label for the status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Scheduled => "Scheduled",
            Self::Sent => "Sent",
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Scheduled => write!(f, "scheduled"),
            Self::Sent => write!(f, "sent"),
        }
    }
}

impl std::str::FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "scheduled" => Ok(Self::Scheduled),
            "sent" => Ok(Self::Sent),
            _ => Err(format!("invalid campaign status: {s}")),
        }
    }
}

/// Category of an email campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "campaign_type", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    Announcement,
    Reminder,
    Newsletter,
}

impl CampaignType {
    /// Get a human-readable label for the category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Announcement => "Announcement",
            Self::Reminder => "Reminder",
            Self::Newsletter => "Newsletter",
        }
    }
}

impl std::fmt::Display for CampaignType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Announcement => write!(f, "announcement"),
            Self::Reminder => write!(f, "reminder"),
            Self::Newsletter => write!(f, "newsletter"),
        }
    }
}

impl std::str::FromStr for CampaignType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "announcement" => Ok(Self::Announcement),
            "reminder" => Ok(Self::Reminder),
            "newsletter" => Ok(Self::Newsletter),
            _ => Err(format!("invalid campaign type: {s}")),
        }
    }
}

/// Kind of a delivery event recorded against a campaign.
///
/// The event log is append-only and written by the delivery-tracking
/// collaborator; this crate only reads it for stats aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "delivery_event_kind", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryEventKind {
    Sent,
    Delivered,
    Opened,
    Clicked,
    Bounced,
}
