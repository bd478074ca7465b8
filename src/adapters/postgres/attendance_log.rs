//! PostgreSQL implementation of AttendanceLog.
//!
//! Reads the check-in records owned by the attendance side of the
//! system.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, EventId, ParticipantId};
use crate::ports::AttendanceLog;

/// PostgreSQL implementation of the AttendanceLog port.
#[derive(Clone)]
pub struct PostgresAttendanceLog {
    pool: PgPool,
}

impl PostgresAttendanceLog {
    /// Creates a new PostgresAttendanceLog.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceLog for PostgresAttendanceLog {
    async fn attended_dates(
        &self,
        event_id: &EventId,
        participant_id: &ParticipantId,
    ) -> Result<BTreeSet<NaiveDate>, DomainError> {
        let rows: Vec<(NaiveDate,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT checkin_date
            FROM attendance_checkins
            WHERE event_id = $1 AND participant_id = $2
            "#,
        )
        .bind(event_id.as_uuid())
        .bind(participant_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch attendance days: {}", e),
            )
        })?;

        Ok(rows.into_iter().map(|(date,)| date).collect())
    }
}
