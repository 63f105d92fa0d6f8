//! Integration tests for Campus Portal.
//!
//! This crate provides in-memory fakes for the campaign service's injected
//! collaborators (store, event log, clock), so the lifecycle and fan-out
//! behavior can be exercised without a live database.
//!
//! The fakes are cheaply cloneable handles over shared state: hand one clone
//! to the service and keep another to inspect or rig from the test.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p campus-portal-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use campus_portal_admin::db::RepositoryError;
use campus_portal_admin::models::{CampaignDraft, EmailCampaign};
use campus_portal_admin::services::campaigns::{CampaignStore, Clock, EventLog};
use campus_portal_core::{CampaignId, CampaignStatus, DeliveryEventKind};

/// A clock frozen at a chosen instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
struct StoreInner {
    campaigns: Mutex<Vec<EmailCampaign>>,
    next_id: AtomicI32,
    create_calls: AtomicUsize,
}

/// In-memory campaign store with call counting.
///
/// Mirrors the Postgres repository's contract: ids assigned on create, list
/// ordered most-recently-created first, monotonic transitions enforced.
#[derive(Clone, Default)]
pub struct InMemoryCampaignStore {
    inner: Arc<StoreInner>,
}

impl InMemoryCampaignStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `create` has been invoked.
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.inner.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CampaignStore for InMemoryCampaignStore {
    async fn create(&self, draft: &CampaignDraft) -> Result<EmailCampaign, RepositoryError> {
        self.inner.create_calls.fetch_add(1, Ordering::SeqCst);
        let id = CampaignId::new(self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let now = Utc::now();
        let campaign = EmailCampaign {
            id,
            name: draft.name.clone(),
            campaign_type: draft.campaign_type,
            subject: draft.subject.clone(),
            html_content: draft.html_content.clone(),
            status: draft.status,
            scheduled_at: draft.scheduled_at,
            sent_at: None,
            created_by: draft.created_by,
            created_at: now,
            updated_at: now,
        };
        self.inner
            .campaigns
            .lock()
            .expect("store lock")
            .push(campaign.clone());
        Ok(campaign)
    }

    async fn list(&self) -> Result<Vec<EmailCampaign>, RepositoryError> {
        // Insertion order is creation order; the contract is newest first
        let campaigns = self.inner.campaigns.lock().expect("store lock");
        Ok(campaigns.iter().rev().cloned().collect())
    }

    async fn get_by_id(&self, id: CampaignId) -> Result<EmailCampaign, RepositoryError> {
        let campaigns = self.inner.campaigns.lock().expect("store lock");
        campaigns
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update_status(
        &self,
        id: CampaignId,
        next: CampaignStatus,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<EmailCampaign, RepositoryError> {
        let mut campaigns = self.inner.campaigns.lock().expect("store lock");
        let campaign = campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepositoryError::NotFound)?;

        if !campaign.status.can_transition_to(next) {
            return Err(RepositoryError::Conflict(format!(
                "campaign {id} is {}, cannot become {next}",
                campaign.status
            )));
        }

        campaign.status = next;
        campaign.scheduled_at = scheduled_at;
        if next == CampaignStatus::Sent && campaign.sent_at.is_none() {
            campaign.sent_at = Some(Utc::now());
        }
        campaign.updated_at = Utc::now();
        Ok(campaign.clone())
    }
}

#[derive(Default)]
struct EventLogInner {
    counts: Mutex<HashMap<i32, Vec<(DeliveryEventKind, i64)>>>,
    failing: Mutex<HashSet<i32>>,
    delays: Mutex<HashMap<i32, Duration>>,
}

/// In-memory event log with per-campaign failure and latency injection.
#[derive(Clone, Default)]
pub struct InMemoryEventLog {
    inner: Arc<EventLogInner>,
}

impl InMemoryEventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record grouped counts for a campaign.
    pub fn set_counts(&self, id: CampaignId, counts: Vec<(DeliveryEventKind, i64)>) {
        self.inner
            .counts
            .lock()
            .expect("event lock")
            .insert(id.as_i32(), counts);
    }

    /// Make lookups for `id` fail with a storage error.
    pub fn fail_for(&self, id: CampaignId) {
        self.inner
            .failing
            .lock()
            .expect("event lock")
            .insert(id.as_i32());
    }

    /// Delay lookups for `id` by `delay`.
    pub fn delay_for(&self, id: CampaignId, delay: Duration) {
        self.inner
            .delays
            .lock()
            .expect("event lock")
            .insert(id.as_i32(), delay);
    }
}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn count_by_kind(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<(DeliveryEventKind, i64)>, RepositoryError> {
        let delay = self
            .inner
            .delays
            .lock()
            .expect("event lock")
            .get(&campaign_id.as_i32())
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self
            .inner
            .failing
            .lock()
            .expect("event lock")
            .contains(&campaign_id.as_i32())
        {
            return Err(RepositoryError::DataCorruption(
                "injected event-log failure".to_string(),
            ));
        }

        Ok(self
            .inner
            .counts
            .lock()
            .expect("event lock")
            .get(&campaign_id.as_i32())
            .cloned()
            .unwrap_or_default())
    }
}
