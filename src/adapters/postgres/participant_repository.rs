//! PostgreSQL implementation of ParticipantRepository.
//!
//! Exhibitors and visitors live in separate registries; the lookup
//! dispatches on the reference's typed kind.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, ParticipantKind, ParticipantRef};
use crate::ports::ParticipantRepository;

/// PostgreSQL implementation of the ParticipantRepository port.
#[derive(Clone)]
pub struct PostgresParticipantRepository {
    pool: PgPool,
}

impl PostgresParticipantRepository {
    /// Creates a new PostgresParticipantRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepository {
    async fn display_name(
        &self,
        participant: &ParticipantRef,
    ) -> Result<Option<String>, DomainError> {
        let query = match participant.kind {
            ParticipantKind::Exhibitor => "SELECT display_name FROM exhibitors WHERE id = $1",
            ParticipantKind::Visitor => "SELECT display_name FROM visitors WHERE id = $1",
        };

        let row: Option<(String,)> = sqlx::query_as(query)
            .bind(participant.id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch participant name: {}", e),
                )
            })?;

        Ok(row.map(|(name,)| name))
    }
}
