//! Event registration model.
//!
//! Registrations are owned by the events subsystem; this service only reads
//! them to populate campaign targeting in the UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use campus_portal_core::{Email, RegistrationId};

/// A person registered for a portal event, eligible for campaign targeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRegistration {
    /// Unique registration ID.
    pub id: RegistrationId,
    /// Registrant display name.
    pub name: String,
    /// Registrant contact address.
    pub email: Email,
    /// Event the registration belongs to.
    pub event: String,
    /// When the registration was recorded.
    pub registered_at: DateTime<Utc>,
}
