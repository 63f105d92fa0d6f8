//! HTTP route handlers for the admin service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (verifies database)
//!
//! # Campaigns
//! GET  /api/campaigns                 - List campaigns with stats
//! POST /api/campaigns                 - Create a campaign (201)
//! GET  /api/campaigns/{id}            - Campaign detail with stats
//! POST /api/campaigns/{id}/status     - Request a status transition
//!
//! # Registrations (read-only, targeting UI)
//! GET  /api/registrations             - List event registrations
//! ```

pub mod campaigns;
pub mod registrations;

use axum::Router;

use crate::state::AppState;

/// Build the combined API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(campaigns::router())
        .merge(registrations::router())
}
