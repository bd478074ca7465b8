//! HTTP DTOs for meeting request endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{ListConfirmedMeetingsResult, ListPendingRequestsResult};
use crate::domain::foundation::{EventId, ParticipantId, ParticipantKind, RequestStatus};
use crate::domain::meeting::{Decision, MeetingRequest};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to propose a meeting on another participant's slot.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMeetingRequest {
    pub event_id: EventId,
    pub requestee_id: ParticipantId,
    pub requestee_kind: ParticipantKind,
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
}

/// Request to accept or reject a pending meeting request.
#[derive(Debug, Clone, Deserialize)]
pub struct RespondRequest {
    pub decision: Decision,
}

/// Query parameters for meeting listings.
#[derive(Debug, Clone, Deserialize)]
pub struct MeetingListParams {
    #[serde(default)]
    pub event_id: Option<EventId>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full meeting request view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingResponse {
    pub id: String,
    pub event_id: String,
    pub requester_id: String,
    pub requester_kind: ParticipantKind,
    pub requestee_id: String,
    pub requestee_kind: ParticipantKind,
    pub sheet_id: String,
    pub slot_start: String,
    pub slot_end: String,
    pub status: RequestStatus,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<String>,
}

impl From<MeetingRequest> for MeetingResponse {
    fn from(request: MeetingRequest) -> Self {
        Self {
            id: request.id().to_string(),
            event_id: request.event_id().to_string(),
            requester_id: request.requester().id.to_string(),
            requester_kind: request.requester().kind,
            requestee_id: request.requestee().id.to_string(),
            requestee_kind: request.requestee().kind,
            sheet_id: request.sheet_id().to_string(),
            slot_start: request.slot_start().as_datetime().to_rfc3339(),
            slot_end: request.slot_end().as_datetime().to_rfc3339(),
            status: request.status(),
            created_at: request.created_at().as_datetime().to_rfc3339(),
            responded_at: request
                .responded_at()
                .map(|t| t.as_datetime().to_rfc3339()),
        }
    }
}

/// One day of confirmed meetings.
#[derive(Debug, Clone, Serialize)]
pub struct DayScheduleResponse {
    pub date: String,
    pub meetings: Vec<MeetingResponse>,
}

/// Confirmed meetings grouped by day, in slot order.
#[derive(Debug, Clone, Serialize)]
pub struct AgendaResponse {
    pub days: Vec<DayScheduleResponse>,
}

impl From<ListConfirmedMeetingsResult> for AgendaResponse {
    fn from(result: ListConfirmedMeetingsResult) -> Self {
        Self {
            days: result
                .days
                .into_iter()
                .map(|day| DayScheduleResponse {
                    date: day.date.to_string(),
                    meetings: day.meetings.into_iter().map(Into::into).collect(),
                })
                .collect(),
        }
    }
}

/// The participant's pending inbox and outbox.
#[derive(Debug, Clone, Serialize)]
pub struct PendingResponse {
    /// Requests addressed to the participant, awaiting their decision.
    pub actionable: Vec<MeetingResponse>,
    /// Requests the participant sent that are still open.
    pub sent: Vec<MeetingResponse>,
}

impl From<ListPendingRequestsResult> for PendingResponse {
    fn from(result: ListPendingRequestsResult) -> Self {
        Self {
            actionable: result.actionable.into_iter().map(Into::into).collect(),
            sent: result.sent.into_iter().map(Into::into).collect(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            code: "FORBIDDEN".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{MeetingRequestId, ParticipantRef, SheetId, Timestamp};
    use crate::domain::scheduling::SlotSpan;
    use chrono::NaiveDate;

    fn test_request() -> MeetingRequest {
        let start = Timestamp::from_naive_utc(
            NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        );
        MeetingRequest::new(
            MeetingRequestId::new(),
            EventId::new(),
            ParticipantRef::visitor(ParticipantId::new()),
            ParticipantRef::exhibitor(ParticipantId::new()),
            SheetId::new(),
            SlotSpan::new(start, start.plus_minutes(30)),
        )
        .unwrap()
    }

    #[test]
    fn create_meeting_request_deserializes() {
        let json = r#"{
            "event_id": "550e8400-e29b-41d4-a716-446655440000",
            "requestee_id": "650e8400-e29b-41d4-a716-446655440000",
            "requestee_kind": "exhibitor",
            "slot_start": "2025-03-10T09:00:00Z",
            "slot_end": "2025-03-10T09:30:00Z"
        }"#;
        let req: CreateMeetingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.requestee_kind, ParticipantKind::Exhibitor);
        assert!(req.slot_start < req.slot_end);
    }

    #[test]
    fn respond_request_deserializes_decision() {
        let req: RespondRequest = serde_json::from_str(r#"{"decision": "accepted"}"#).unwrap();
        assert_eq!(req.decision, Decision::Accepted);

        let req: RespondRequest = serde_json::from_str(r#"{"decision": "rejected"}"#).unwrap();
        assert_eq!(req.decision, Decision::Rejected);
    }

    #[test]
    fn meeting_list_params_event_filter_is_optional() {
        let params: MeetingListParams = serde_json::from_str("{}").unwrap();
        assert!(params.event_id.is_none());
    }

    #[test]
    fn meeting_response_conversion() {
        let request = test_request();
        let id = request.id().to_string();

        let response: MeetingResponse = request.into();
        assert_eq!(response.id, id);
        assert_eq!(response.status, RequestStatus::Pending);
        assert!(response.responded_at.is_none());
        assert!(response.slot_start.starts_with("2025-03-10T09:00:00"));
    }

    #[test]
    fn agenda_response_preserves_day_grouping() {
        use crate::application::DaySchedule;

        let result = ListConfirmedMeetingsResult {
            days: vec![DaySchedule {
                date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                meetings: vec![test_request()],
            }],
        };

        let response: AgendaResponse = result.into();
        assert_eq!(response.days.len(), 1);
        assert_eq!(response.days[0].date, "2025-03-10");
        assert_eq!(response.days[0].meetings.len(), 1);
    }

    #[test]
    fn error_response_conflict_creates_correctly() {
        let error = ErrorResponse::conflict("Slot is not available");
        assert_eq!(error.code, "CONFLICT");
        assert_eq!(error.message, "Slot is not available");
    }
}
