//! Read-only access to event registrations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use campus_portal_core::{Email, RegistrationId};

use super::RepositoryError;
use crate::models::EventRegistration;

/// Internal row type for `PostgreSQL` registration queries.
#[derive(Debug, sqlx::FromRow)]
struct RegistrationRow {
    id: RegistrationId,
    name: String,
    email: Email,
    event: String,
    registered_at: DateTime<Utc>,
}

impl From<RegistrationRow> for EventRegistration {
    fn from(row: RegistrationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            event: row.event,
            registered_at: row.registered_at,
        }
    }
}

/// Repository for event-registration queries. This service never writes
/// registration rows.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Create a new registration repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all registrations, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<EventRegistration>, RepositoryError> {
        let rows = sqlx::query_as::<_, RegistrationRow>(
            "SELECT id, name, email, event, registered_at \
             FROM event_registration \
             ORDER BY registered_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
