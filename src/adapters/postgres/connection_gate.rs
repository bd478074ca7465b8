//! PostgreSQL implementation of ConnectionGate.
//!
//! Reads the scan records owned by the connection side of the system.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, EventId, ParticipantId};
use crate::ports::ConnectionGate;

/// PostgreSQL implementation of the ConnectionGate port.
#[derive(Clone)]
pub struct PostgresConnectionGate {
    pool: PgPool,
}

impl PostgresConnectionGate {
    /// Creates a new PostgresConnectionGate.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionGate for PostgresConnectionGate {
    async fn has_connection(
        &self,
        event_id: &EventId,
        a: &ParticipantId,
        b: &ParticipantId,
    ) -> Result<bool, DomainError> {
        // Scan records are stored directed; the gate is symmetric
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM connections
            WHERE event_id = $1
              AND ((participant_a = $2 AND participant_b = $3)
                OR (participant_a = $3 AND participant_b = $2))
            "#,
        )
        .bind(event_id.as_uuid())
        .bind(a.as_uuid())
        .bind(b.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check connection: {}", e),
            )
        })?;

        Ok(result.0 > 0)
    }
}
