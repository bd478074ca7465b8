//! PostgreSQL implementation of MeetingReader.
//!
//! Read-optimized queries over meeting requests for agenda and inbox
//! views.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, MeetingRequestId, ParticipantId, ParticipantKind,
    ParticipantRef, RequestStatus, SheetId, Timestamp,
};
use crate::domain::meeting::MeetingRequest;
use crate::ports::MeetingReader;

/// PostgreSQL implementation of the MeetingReader port.
pub struct PostgresMeetingReader {
    pool: PgPool,
}

impl PostgresMeetingReader {
    /// Creates a new PostgresMeetingReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row for meeting request queries.
#[derive(Debug, sqlx::FromRow)]
struct MeetingRequestRow {
    id: Uuid,
    event_id: Uuid,
    requester_id: Uuid,
    requester_kind: String,
    requestee_id: Uuid,
    requestee_kind: String,
    sheet_id: Uuid,
    slot_start: DateTime<Utc>,
    slot_end: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
    responded_at: Option<DateTime<Utc>>,
}

impl TryFrom<MeetingRequestRow> for MeetingRequest {
    type Error = DomainError;

    fn try_from(row: MeetingRequestRow) -> Result<Self, Self::Error> {
        let requester_kind = parse_kind(&row.requester_kind)?;
        let requestee_kind = parse_kind(&row.requestee_kind)?;
        let status = parse_status(&row.status)?;

        Ok(MeetingRequest::reconstitute(
            MeetingRequestId::from_uuid(row.id),
            EventId::from_uuid(row.event_id),
            ParticipantRef::new(ParticipantId::from_uuid(row.requester_id), requester_kind),
            ParticipantRef::new(ParticipantId::from_uuid(row.requestee_id), requestee_kind),
            SheetId::from_uuid(row.sheet_id),
            Timestamp::from_datetime(row.slot_start),
            Timestamp::from_datetime(row.slot_end),
            status,
            Timestamp::from_datetime(row.created_at),
            row.responded_at.map(Timestamp::from_datetime),
        ))
    }
}

#[async_trait]
impl MeetingReader for PostgresMeetingReader {
    async fn confirmed_meetings(
        &self,
        participant_id: &ParticipantId,
        event_id: Option<&EventId>,
    ) -> Result<Vec<MeetingRequest>, DomainError> {
        let mut query = String::from(
            r#"
            SELECT id, event_id, requester_id, requester_kind, requestee_id, requestee_kind,
                   sheet_id, slot_start, slot_end, status, created_at, responded_at
            FROM meeting_requests
            WHERE status = 'accepted'
              AND (requester_id = $1 OR requestee_id = $1)
            "#,
        );
        if event_id.is_some() {
            query.push_str(" AND event_id = $2");
        }
        query.push_str(" ORDER BY slot_start ASC");

        let mut q = sqlx::query_as::<_, MeetingRequestRow>(&query).bind(participant_id.as_uuid());
        if let Some(event_id) = event_id {
            q = q.bind(event_id.as_uuid());
        }

        let rows = q.fetch_all(&self.pool).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list confirmed meetings: {}", e),
            )
        })?;

        rows.into_iter().map(MeetingRequest::try_from).collect()
    }

    async fn pending_for_requestee(
        &self,
        participant_id: &ParticipantId,
        event_id: Option<&EventId>,
    ) -> Result<Vec<MeetingRequest>, DomainError> {
        let mut query = String::from(
            r#"
            SELECT id, event_id, requester_id, requester_kind, requestee_id, requestee_kind,
                   sheet_id, slot_start, slot_end, status, created_at, responded_at
            FROM meeting_requests
            WHERE status = 'pending' AND requestee_id = $1
            "#,
        );
        if event_id.is_some() {
            query.push_str(" AND event_id = $2");
        }
        query.push_str(" ORDER BY created_at ASC");

        let mut q = sqlx::query_as::<_, MeetingRequestRow>(&query).bind(participant_id.as_uuid());
        if let Some(event_id) = event_id {
            q = q.bind(event_id.as_uuid());
        }

        let rows = q.fetch_all(&self.pool).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list incoming requests: {}", e),
            )
        })?;

        rows.into_iter().map(MeetingRequest::try_from).collect()
    }

    async fn pending_from_requester(
        &self,
        participant_id: &ParticipantId,
        event_id: Option<&EventId>,
    ) -> Result<Vec<MeetingRequest>, DomainError> {
        let mut query = String::from(
            r#"
            SELECT id, event_id, requester_id, requester_kind, requestee_id, requestee_kind,
                   sheet_id, slot_start, slot_end, status, created_at, responded_at
            FROM meeting_requests
            WHERE status = 'pending' AND requester_id = $1
            "#,
        );
        if event_id.is_some() {
            query.push_str(" AND event_id = $2");
        }
        query.push_str(" ORDER BY created_at ASC");

        let mut q = sqlx::query_as::<_, MeetingRequestRow>(&query).bind(participant_id.as_uuid());
        if let Some(event_id) = event_id {
            q = q.bind(event_id.as_uuid());
        }

        let rows = q.fetch_all(&self.pool).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list outgoing requests: {}", e),
            )
        })?;

        rows.into_iter().map(MeetingRequest::try_from).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

fn parse_status(s: &str) -> Result<RequestStatus, DomainError> {
    match s {
        "pending" => Ok(RequestStatus::Pending),
        "accepted" => Ok(RequestStatus::Accepted),
        "rejected" => Ok(RequestStatus::Rejected),
        "cancelled" => Ok(RequestStatus::Cancelled),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid request status: {}", s),
        )),
    }
}

fn parse_kind(s: &str) -> Result<ParticipantKind, DomainError> {
    s.parse::<ParticipantKind>().map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid participant kind: {}", e),
        )
    })
}
