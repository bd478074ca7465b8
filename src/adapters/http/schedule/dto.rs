//! HTTP DTOs for schedule endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::ListAvailableSlotsResult;
use crate::domain::foundation::ParticipantKind;
use crate::domain::scheduling::{Slot, SlotSheet};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to share or hide a sheet's slots.
#[derive(Debug, Clone, Deserialize)]
pub struct SetVisibilityRequest {
    pub show_slots: bool,
}

/// Query parameters for listing a participant's slots.
#[derive(Debug, Clone, Deserialize)]
pub struct ListSlotsParams {
    /// Restrict the listing to days the sheet owner has checked in on.
    #[serde(default)]
    pub attended_days_only: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One bookable slot in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SlotResponse {
    pub start: String,
    pub end: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_request_id: Option<String>,
}

impl From<Slot> for SlotResponse {
    fn from(slot: Slot) -> Self {
        Self {
            start: slot.start().as_datetime().to_rfc3339(),
            end: slot.end().as_datetime().to_rfc3339(),
            status: slot.state().as_str().to_string(),
            meeting_request_id: slot.state().request_id().map(|id| id.to_string()),
        }
    }
}

/// Full sheet view for the owner.
#[derive(Debug, Clone, Serialize)]
pub struct SheetResponse {
    pub id: String,
    pub event_id: String,
    pub owner_id: String,
    pub owner_kind: ParticipantKind,
    pub show_slots: bool,
    pub slots: Vec<SlotResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SlotSheet> for SheetResponse {
    fn from(sheet: SlotSheet) -> Self {
        Self {
            id: sheet.id().to_string(),
            event_id: sheet.event_id().to_string(),
            owner_id: sheet.owner().id.to_string(),
            owner_kind: sheet.owner().kind,
            show_slots: sheet.show_slots(),
            slots: sheet.slots().iter().copied().map(Into::into).collect(),
            created_at: sheet.created_at().as_datetime().to_rfc3339(),
            updated_at: sheet.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Slot listing for a viewer, owner or counterpart.
#[derive(Debug, Clone, Serialize)]
pub struct SlotListResponse {
    pub sheet_id: String,
    pub owner_id: String,
    pub owner_kind: ParticipantKind,
    pub show_slots: bool,
    pub slots: Vec<SlotResponse>,
}

impl From<ListAvailableSlotsResult> for SlotListResponse {
    fn from(result: ListAvailableSlotsResult) -> Self {
        Self {
            sheet_id: result.sheet_id.to_string(),
            owner_id: result.owner.id.to_string(),
            owner_kind: result.owner.kind,
            show_slots: result.show_slots,
            slots: result.slots.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response for a visibility change.
#[derive(Debug, Clone, Serialize)]
pub struct VisibilityResponse {
    pub sheet_id: String,
    pub show_slots: bool,
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
    use crate::domain::event::EventWindow;
    use crate::domain::foundation::{EventId, MeetingRequestId, ParticipantId, ParticipantRef, SheetId};
    use chrono::{NaiveDate, NaiveTime};

    fn test_sheet() -> SlotSheet {
        let window = EventWindow::new(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            30,
        )
        .unwrap();
        SlotSheet::new(
            SheetId::new(),
            ParticipantRef::exhibitor(ParticipantId::new()),
            EventId::new(),
            &window,
        )
    }

    #[test]
    fn set_visibility_request_deserializes() {
        let json = r#"{"show_slots": true}"#;
        let req: SetVisibilityRequest = serde_json::from_str(json).unwrap();
        assert!(req.show_slots);
    }

    #[test]
    fn list_slots_params_default_to_all_days() {
        let params: ListSlotsParams = serde_json::from_str("{}").unwrap();
        assert!(!params.attended_days_only);
    }

    #[test]
    fn slot_response_conversion() {
        let sheet = test_sheet();
        let response: SlotResponse = sheet.slots()[0].into();

        assert_eq!(response.status, "available");
        assert!(response.meeting_request_id.is_none());
        assert!(response.start.starts_with("2025-03-10T09:00:00"));
    }

    #[test]
    fn slot_response_carries_the_holding_request() {
        let sheet = test_sheet();
        let request_id = MeetingRequestId::new();
        let mut slot = sheet.slots()[0];
        slot.claim(request_id).unwrap();

        let response: SlotResponse = slot.into();
        assert_eq!(response.status, "requested");
        assert_eq!(response.meeting_request_id, Some(request_id.to_string()));
    }

    #[test]
    fn sheet_response_conversion() {
        let sheet = test_sheet();
        let owner_id = sheet.owner().id.to_string();

        let response: SheetResponse = sheet.into();
        assert_eq!(response.owner_id, owner_id);
        assert_eq!(response.owner_kind, ParticipantKind::Exhibitor);
        assert!(!response.show_slots);
        assert_eq!(response.slots.len(), 2);
    }

    #[test]
    fn error_response_not_found_creates_correctly() {
        let error = ErrorResponse::not_found("Event not found: abc-123");
        assert_eq!(error.code, "NOT_FOUND");
        assert!(error.message.contains("abc-123"));
    }
}
