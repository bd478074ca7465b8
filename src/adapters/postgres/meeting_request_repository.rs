//! PostgreSQL implementation of MeetingRequestRepository.
//!
//! Persists meeting requests. Resolution is a single guarded UPDATE on
//! the pending status, so concurrent responders race in the database
//! and exactly one of them performs the transition.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, MeetingRequestId, ParticipantId, ParticipantKind,
    ParticipantRef, RequestStatus, SheetId, Timestamp,
};
use crate::domain::meeting::MeetingRequest;
use crate::ports::MeetingRequestRepository;

/// PostgreSQL implementation of MeetingRequestRepository.
#[derive(Clone)]
pub struct PostgresMeetingRequestRepository {
    pool: PgPool,
}

impl PostgresMeetingRequestRepository {
    /// Creates a new PostgresMeetingRequestRepository.
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
        let status = str_to_request_status(&row.status)?;

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
impl MeetingRequestRepository for PostgresMeetingRequestRepository {
    async fn create(&self, request: &MeetingRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO meeting_requests (
                id, event_id, requester_id, requester_kind, requestee_id, requestee_kind,
                sheet_id, slot_start, slot_end, status, created_at, responded_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(request.id().as_uuid())
        .bind(request.event_id().as_uuid())
        .bind(request.requester().id.as_uuid())
        .bind(request.requester().kind.as_str())
        .bind(request.requestee().id.as_uuid())
        .bind(request.requestee().kind.as_str())
        .bind(request.sheet_id().as_uuid())
        .bind(request.slot_start().as_datetime())
        .bind(request.slot_end().as_datetime())
        .bind(request_status_to_str(request.status()))
        .bind(request.created_at().as_datetime())
        .bind(request.responded_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert meeting request: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &MeetingRequestId,
    ) -> Result<Option<MeetingRequest>, DomainError> {
        let row: Option<MeetingRequestRow> = sqlx::query_as(
            r#"
            SELECT id, event_id, requester_id, requester_kind, requestee_id, requestee_kind,
                   sheet_id, slot_start, slot_end, status, created_at, responded_at
            FROM meeting_requests
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch meeting request: {}", e),
            )
        })?;

        row.map(MeetingRequest::try_from).transpose()
    }

    async fn resolve(
        &self,
        id: &MeetingRequestId,
        resolution: RequestStatus,
        responded_at: Timestamp,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE meeting_requests SET
                status = $2,
                responded_at = $3
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(id.as_uuid())
        .bind(request_status_to_str(resolution))
        .bind(responded_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to resolve meeting request: {}", e),
            )
        })?;

        if result.rows_affected() == 1 {
            return Ok(true);
        }

        // No pending row was updated; tell a resolved request apart
        // from a missing one
        let exists: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM meeting_requests WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to check meeting request existence: {}", e),
                )
            })?;

        if exists.0 > 0 {
            Ok(false)
        } else {
            Err(
                DomainError::new(ErrorCode::RequestNotFound, "Meeting request not found")
                    .with_detail("meeting_request_id", id.to_string()),
            )
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Helper Functions
// ════════════════════════════════════════════════════════════════════════════════

fn request_status_to_str(status: RequestStatus) -> &'static str {
    match status {
        RequestStatus::Pending => "pending",
        RequestStatus::Accepted => "accepted",
        RequestStatus::Rejected => "rejected",
        RequestStatus::Cancelled => "cancelled",
    }
}

fn str_to_request_status(s: &str) -> Result<RequestStatus, DomainError> {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_status_conversion_roundtrips() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::Accepted,
            RequestStatus::Rejected,
            RequestStatus::Cancelled,
        ] {
            assert_eq!(
                str_to_request_status(request_status_to_str(status)).unwrap(),
                status
            );
        }
    }

    #[test]
    fn str_to_request_status_rejects_invalid() {
        assert!(str_to_request_status("open").is_err());
    }

    #[test]
    fn parse_kind_rejects_unknown() {
        assert!(parse_kind("sponsor").is_err());
    }
}
