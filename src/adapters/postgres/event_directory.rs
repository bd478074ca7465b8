//! PostgreSQL implementation of EventDirectory.
//!
//! Reads the event tables owned by the registration side of the system.
//! This adapter never writes them.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::event::EventWindow;
use crate::domain::foundation::{DomainError, ErrorCode, EventId, ParticipantRef};
use crate::ports::EventDirectory;

/// PostgreSQL implementation of the EventDirectory port.
#[derive(Clone)]
pub struct PostgresEventDirectory {
    pool: PgPool,
}

impl PostgresEventDirectory {
    /// Creates a new PostgresEventDirectory.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventDirectory for PostgresEventDirectory {
    async fn event_window(&self, event_id: &EventId) -> Result<Option<EventWindow>, DomainError> {
        let row: Option<(NaiveDate, NaiveDate, NaiveTime, NaiveTime, i32)> = sqlx::query_as(
            r#"
            SELECT start_date, end_date, daily_start_time, daily_end_time, slot_interval_minutes
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(event_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch event window: {}", e),
            )
        })?;

        let Some((start_date, end_date, daily_start, daily_end, interval)) = row else {
            return Ok(None);
        };

        let window = EventWindow::new(start_date, end_date, daily_start, daily_end, interval as u32)
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Event has an invalid scheduling window: {}", e),
                )
            })?;

        Ok(Some(window))
    }

    async fn is_participant_registered(
        &self,
        event_id: &EventId,
        participant: &ParticipantRef,
    ) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM event_registrations
            WHERE event_id = $1 AND participant_id = $2 AND participant_kind = $3
            "#,
        )
        .bind(event_id.as_uuid())
        .bind(participant.id.as_uuid())
        .bind(participant.kind.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check event registration: {}", e),
            )
        })?;

        Ok(result.0 > 0)
    }

    async fn active_event_ids(&self, as_of: NaiveDate) -> Result<Vec<EventId>, DomainError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT id
            FROM events
            WHERE end_date >= $1
            "#,
        )
        .bind(as_of)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list active events: {}", e),
            )
        })?;

        Ok(rows.into_iter().map(|(id,)| EventId::from_uuid(id)).collect())
    }
}
