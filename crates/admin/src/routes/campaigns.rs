//! Campaign route handlers.
//!
//! Thin JSON adapters over [`CampaignService`]; all lifecycle rules live in
//! the service, not here.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use campus_portal_core::{CampaignId, CampaignStatus};

use crate::error::AppError;
use crate::models::{CampaignDraft, CampaignWithStats, EmailCampaign};
use crate::state::AppState;

/// Build the campaigns router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/campaigns", get(list).post(create))
        .route("/api/campaigns/{id}", get(show))
        .route("/api/campaigns/{id}/status", post(transition))
}

/// Request body for a status transition.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    status: CampaignStatus,
    #[serde(default)]
    scheduled_at: Option<DateTime<Utc>>,
}

/// List all campaigns with their stats, most recently created first.
///
/// GET /api/campaigns
///
/// Entries whose aggregation failed or timed out carry a `failed` stats
/// marker; the list itself still succeeds.
async fn list(State(state): State<AppState>) -> Result<Json<Vec<CampaignWithStats>>, AppError> {
    let campaigns = state.campaigns().list_with_stats().await?;
    Ok(Json(campaigns))
}

/// Create a campaign from a draft.
///
/// POST /api/campaigns
///
/// Returns 400 with the specific validation message for a bad draft, 201
/// with the stored campaign (server-assigned id and timestamps) on success.
async fn create(
    State(state): State<AppState>,
    Json(draft): Json<CampaignDraft>,
) -> Result<(StatusCode, Json<EmailCampaign>), AppError> {
    let campaign = state.campaigns().create(draft).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// Fetch a single campaign with its stats.
///
/// GET /api/campaigns/{id}
async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CampaignWithStats>, AppError> {
    let campaign = state
        .campaigns()
        .get_with_stats(CampaignId::new(id))
        .await?;
    Ok(Json(campaign))
}

/// Request a status transition for a campaign.
///
/// POST /api/campaigns/{id}/status
///
/// Returns 409 for a non-monotonic transition, 400 for a scheduling request
/// without a future timestamp.
async fn transition(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<TransitionRequest>,
) -> Result<Json<EmailCampaign>, AppError> {
    let campaign = state
        .campaigns()
        .transition(CampaignId::new(id), body.status, body.scheduled_at)
        .await?;
    Ok(Json(campaign))
}
