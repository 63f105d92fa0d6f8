//! Integration tests for campaign creation and status transitions.
//!
//! These exercise the campaign service against in-memory collaborators:
//! validation short-circuits before persistence, and the status state
//! machine only moves forward.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use campus_portal_admin::config::StatsConfig;
use campus_portal_admin::error::AppError;
use campus_portal_admin::models::CampaignDraft;
use campus_portal_admin::services::CampaignService;
use campus_portal_admin::services::campaigns::ValidationError;
use campus_portal_core::{CampaignStatus, CampaignType};
use campus_portal_integration_tests::{FixedClock, InMemoryCampaignStore, InMemoryEventLog};

type Service = CampaignService<InMemoryCampaignStore, InMemoryEventLog>;

fn stats_config() -> StatsConfig {
    StatsConfig {
        concurrency: 4,
        timeout: Duration::from_secs(1),
    }
}

fn service(store: &InMemoryCampaignStore, events: &InMemoryEventLog) -> Service {
    CampaignService::new(store.clone(), events.clone(), stats_config())
}

fn draft(name: &str) -> CampaignDraft {
    CampaignDraft {
        name: name.to_string(),
        campaign_type: CampaignType::Reminder,
        subject: "Don't forget!".to_string(),
        html_content: "<p>Hi</p>".to_string(),
        status: CampaignStatus::Draft,
        scheduled_at: None,
        created_by: None,
    }
}

#[tokio::test]
async fn test_create_draft_end_to_end() {
    let store = InMemoryCampaignStore::new();
    let service = service(&store, &InMemoryEventLog::new());

    let created = service
        .create(draft("Spring Reminder"))
        .await
        .expect("create draft");

    assert!(created.id.as_i32() >= 1);
    assert_eq!(created.status, CampaignStatus::Draft);
    assert!(created.scheduled_at.is_none());
    assert!(created.sent_at.is_none());
    assert_eq!(created.name, "Spring Reminder");
}

#[tokio::test]
async fn test_empty_fields_never_reach_the_store() {
    let store = InMemoryCampaignStore::new();
    let service = service(&store, &InMemoryEventLog::new());

    for field in ["name", "subject", "html_content"] {
        let mut d = draft("X");
        match field {
            "name" => d.name = "   ".to_string(),
            "subject" => d.subject = String::new(),
            _ => d.html_content = String::new(),
        }
        let err = service.create(d).await.expect_err("must fail validation");
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::EmptyField(_))
        ));
    }

    assert_eq!(store.create_calls(), 0);
}

#[tokio::test]
async fn test_scheduled_campaign_requires_future_timestamp() {
    let now = Utc::now();
    let store = InMemoryCampaignStore::new();
    let service = CampaignService::with_clock(
        store.clone(),
        InMemoryEventLog::new(),
        stats_config(),
        Arc::new(FixedClock(now)),
    );

    let mut future = draft("Open Day");
    future.status = CampaignStatus::Scheduled;
    future.scheduled_at = Some(now + chrono::Duration::hours(1));
    let created = service.create(future).await.expect("future schedule ok");
    assert_eq!(created.status, CampaignStatus::Scheduled);
    assert!(created.scheduled_at.is_some());

    let mut past = draft("Open Day");
    past.status = CampaignStatus::Scheduled;
    past.scheduled_at = Some(now - chrono::Duration::hours(1));
    let err = service.create(past).await.expect_err("past schedule fails");
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::InvalidSchedule)
    ));

    // Only the valid draft was persisted
    assert_eq!(store.create_calls(), 1);
}

#[tokio::test]
async fn test_unscheduled_draft_rejects_timestamp() {
    let service = service(&InMemoryCampaignStore::new(), &InMemoryEventLog::new());

    let mut d = draft("Newsletter");
    d.scheduled_at = Some(Utc::now() + chrono::Duration::hours(1));
    let err = service.create(d).await.expect_err("must fail");
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::UnexpectedSchedule)
    ));
}

#[tokio::test]
async fn test_full_forward_lifecycle() {
    let store = InMemoryCampaignStore::new();
    let service = service(&store, &InMemoryEventLog::new());

    let created = service.create(draft("Lifecycle")).await.expect("create");

    let scheduled = service
        .transition(
            created.id,
            CampaignStatus::Scheduled,
            Some(Utc::now() + chrono::Duration::hours(2)),
        )
        .await
        .expect("draft -> scheduled");
    assert_eq!(scheduled.status, CampaignStatus::Scheduled);

    let sent = service
        .transition(created.id, CampaignStatus::Sent, None)
        .await
        .expect("scheduled -> sent");
    assert_eq!(sent.status, CampaignStatus::Sent);
    assert!(sent.sent_at.is_some());
    assert!(sent.scheduled_at.is_none());
}

#[tokio::test]
async fn test_draft_may_go_directly_to_sent() {
    let store = InMemoryCampaignStore::new();
    let service = service(&store, &InMemoryEventLog::new());

    let created = service.create(draft("Direct")).await.expect("create");
    let sent = service
        .transition(created.id, CampaignStatus::Sent, None)
        .await
        .expect("draft -> sent");
    assert_eq!(sent.status, CampaignStatus::Sent);
}

#[tokio::test]
async fn test_backward_transitions_are_rejected() {
    let store = InMemoryCampaignStore::new();
    let service = service(&store, &InMemoryEventLog::new());

    let created = service.create(draft("No going back")).await.expect("create");
    service
        .transition(created.id, CampaignStatus::Sent, None)
        .await
        .expect("draft -> sent");

    for next in [CampaignStatus::Draft, CampaignStatus::Scheduled] {
        let err = service
            .transition(created.id, next, None)
            .await
            .expect_err("backward transition must fail");
        assert!(matches!(err, AppError::InvalidTransition { .. }));
    }
}

#[tokio::test]
async fn test_scheduling_transition_requires_future_timestamp() {
    let store = InMemoryCampaignStore::new();
    let service = service(&store, &InMemoryEventLog::new());

    let created = service.create(draft("Sched")).await.expect("create");

    let err = service
        .transition(
            created.id,
            CampaignStatus::Scheduled,
            Some(Utc::now() - chrono::Duration::minutes(5)),
        )
        .await
        .expect_err("past timestamp must fail");
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::InvalidSchedule)
    ));

    let err = service
        .transition(created.id, CampaignStatus::Scheduled, None)
        .await
        .expect_err("missing timestamp must fail");
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::InvalidSchedule)
    ));
}

#[tokio::test]
async fn test_unknown_campaign_is_not_found() {
    let service = service(&InMemoryCampaignStore::new(), &InMemoryEventLog::new());

    let err = service
        .get_with_stats(campus_portal_core::CampaignId::new(999))
        .await
        .expect_err("missing campaign");
    assert!(matches!(err, AppError::NotFound(_)));
}
