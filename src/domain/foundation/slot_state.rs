//! Slot state machine for bookable time slots.
//!
//! A slot's state carries the meeting request holding it, so a
//! non-available slot always knows which request put it there and an
//! available slot structurally cannot reference one.

use crate::domain::foundation::{DomainError, ErrorCode, MeetingRequestId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking state of a single slot on a participant's sheet.
///
/// Transitions:
/// - Available -> Requested (request created)
/// - Requested -> Booked (request accepted)
/// - Requested -> Available (request rejected or cancelled)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "status", content = "meeting_request_id", rename_all = "snake_case")]
pub enum SlotState {
    /// Open for booking. References no request.
    #[default]
    Available,

    /// Held by a pending meeting request.
    Requested(MeetingRequestId),

    /// Confirmed for the accepted meeting request.
    Booked(MeetingRequestId),
}

impl SlotState {
    /// Returns true if the slot can be claimed by a new request.
    pub fn is_available(&self) -> bool {
        matches!(self, SlotState::Available)
    }

    /// Returns the request currently holding this slot, if any.
    pub fn request_id(&self) -> Option<MeetingRequestId> {
        match self {
            SlotState::Available => None,
            SlotState::Requested(id) | SlotState::Booked(id) => Some(*id),
        }
    }

    /// Returns the persisted name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotState::Available => "available",
            SlotState::Requested(_) => "requested",
            SlotState::Booked(_) => "booked",
        }
    }

    /// Claims an available slot for a new pending request.
    ///
    /// Fails with `SlotUnavailable` if the slot is already requested
    /// or booked.
    pub fn claim(&self, request_id: MeetingRequestId) -> Result<SlotState, DomainError> {
        match self {
            SlotState::Available => Ok(SlotState::Requested(request_id)),
            _ => Err(
                DomainError::new(ErrorCode::SlotUnavailable, "Slot is not available")
                    .with_detail("current_state", self.as_str()),
            ),
        }
    }

    /// Confirms a requested slot for the accepting request.
    ///
    /// Fails with `InconsistentState` if the slot is not held by the
    /// given request.
    pub fn book(&self, request_id: MeetingRequestId) -> Result<SlotState, DomainError> {
        match self {
            SlotState::Requested(held) if *held == request_id => Ok(SlotState::Booked(request_id)),
            _ => Err(self.mismatch_error("book", request_id)),
        }
    }

    /// Returns a requested slot to available when its request is
    /// rejected or cancelled.
    ///
    /// Fails with `InconsistentState` if the slot is not held by the
    /// given request.
    pub fn release(&self, request_id: MeetingRequestId) -> Result<SlotState, DomainError> {
        match self {
            SlotState::Requested(held) if *held == request_id => Ok(SlotState::Available),
            _ => Err(self.mismatch_error("release", request_id)),
        }
    }

    fn mismatch_error(&self, operation: &str, request_id: MeetingRequestId) -> DomainError {
        DomainError::new(
            ErrorCode::InconsistentState,
            format!("Slot is not held by the expected request, cannot {}", operation),
        )
        .with_detail("current_state", self.as_str())
        .with_detail("expected_request_id", request_id.to_string())
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
