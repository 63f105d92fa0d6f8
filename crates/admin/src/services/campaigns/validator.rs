//! Pure validation of campaign drafts.
//!
//! Deterministic given the same draft and `now`; the current time is passed
//! in rather than read from the wall clock so the rules are testable.

use chrono::{DateTime, Utc};
use thiserror::Error;

use campus_portal_core::CampaignStatus;

use crate::models::CampaignDraft;

/// Reasons a campaign draft is rejected before persistence.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// Status is `scheduled` but `scheduled_at` is absent or not in the future.
    #[error("scheduled campaigns require a scheduled_at in the future")]
    InvalidSchedule,

    /// `scheduled_at` was supplied for a non-scheduled status.
    #[error("scheduled_at is only allowed when status is scheduled")]
    UnexpectedSchedule,
}

/// Validate a draft against the campaign creation rules.
///
/// Checks run in order and short-circuit on the first failure:
/// 1. `name`, `subject`, `html_content` non-empty after trimming.
/// 2. `scheduled` status requires a strictly-future `scheduled_at`.
/// 3. Any other status requires no `scheduled_at`.
///
/// The campaign type is enforced by the `CampaignType` enum at the
/// deserialization boundary, so an unrecognized type never reaches here.
///
/// # Errors
///
/// Returns the first failing rule's `ValidationError`.
pub fn validate(draft: &CampaignDraft, now: DateTime<Utc>) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::EmptyField("name"));
    }
    if draft.subject.trim().is_empty() {
        return Err(ValidationError::EmptyField("subject"));
    }
    if draft.html_content.trim().is_empty() {
        return Err(ValidationError::EmptyField("html_content"));
    }

    match draft.status {
        CampaignStatus::Scheduled => match draft.scheduled_at {
            Some(at) if at > now => Ok(()),
            _ => Err(ValidationError::InvalidSchedule),
        },
        CampaignStatus::Draft | CampaignStatus::Sent => {
            if draft.scheduled_at.is_some() {
                Err(ValidationError::UnexpectedSchedule)
            } else {
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_portal_core::CampaignType;
    use chrono::Duration;

    fn draft() -> CampaignDraft {
        CampaignDraft {
            name: "Spring Reminder".to_string(),
            campaign_type: CampaignType::Reminder,
            subject: "Don't forget!".to_string(),
            html_content: "<p>Hi</p>".to_string(),
            status: CampaignStatus::Draft,
            scheduled_at: None,
            created_by: None,
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert_eq!(validate(&draft(), Utc::now()), Ok(()));
    }

    #[test]
    fn test_empty_fields_fail_in_order() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert_eq!(
            validate(&d, Utc::now()),
            Err(ValidationError::EmptyField("name"))
        );

        let mut d = draft();
        d.subject = String::new();
        assert_eq!(
            validate(&d, Utc::now()),
            Err(ValidationError::EmptyField("subject"))
        );

        let mut d = draft();
        d.html_content = "\n\t".to_string();
        assert_eq!(
            validate(&d, Utc::now()),
            Err(ValidationError::EmptyField("html_content"))
        );
    }

    #[test]
    fn test_scheduled_requires_future_timestamp() {
        let now = Utc::now();

        let mut d = draft();
        d.status = CampaignStatus::Scheduled;
        d.scheduled_at = Some(now + Duration::hours(1));
        assert_eq!(validate(&d, now), Ok(()));

        d.scheduled_at = Some(now - Duration::hours(1));
        assert_eq!(validate(&d, now), Err(ValidationError::InvalidSchedule));

        d.scheduled_at = None;
        assert_eq!(validate(&d, now), Err(ValidationError::InvalidSchedule));

        // Exactly `now` is not strictly in the future
        d.scheduled_at = Some(now);
        assert_eq!(validate(&d, now), Err(ValidationError::InvalidSchedule));
    }

    #[test]
    fn test_unscheduled_must_not_carry_timestamp() {
        let now = Utc::now();
        let mut d = draft();
        d.scheduled_at = Some(now + Duration::hours(1));
        assert_eq!(validate(&d, now), Err(ValidationError::UnexpectedSchedule));
    }

    #[test]
    fn test_deterministic_for_fixed_now() {
        let now = Utc::now();
        let mut d = draft();
        d.status = CampaignStatus::Scheduled;
        d.scheduled_at = Some(now + Duration::minutes(30));
        assert_eq!(validate(&d, now), validate(&d, now));
    }
}
