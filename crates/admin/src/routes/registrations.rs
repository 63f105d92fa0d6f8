//! Event registration route handlers.
//!
//! Registrations belong to the events subsystem; this endpoint is a
//! read-only feed for populating campaign targeting in the UI.

use axum::{Json, Router, extract::State, routing::get};

use crate::error::AppError;
use crate::models::EventRegistration;
use crate::state::AppState;

/// Build the registrations router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/registrations", get(list))
}

/// List all event registrations, most recent first.
///
/// GET /api/registrations
async fn list(State(state): State<AppState>) -> Result<Json<Vec<EventRegistration>>, AppError> {
    let registrations = state.registrations().list().await?;
    Ok(Json(registrations))
}
