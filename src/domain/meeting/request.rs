//! Meeting request aggregate entity.
//!
//! A request is one participant's proposal to occupy a specific slot
//! on another participant's sheet. It carries a direct reference to
//! the targeted sheet and slot so resolution never has to search for
//! the slot it belongs to.

use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, MeetingRequestId, ParticipantId, ParticipantRef,
    RequestStatus, SheetId, Timestamp,
};
use crate::domain::scheduling::SlotSpan;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The requestee's answer to a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    /// Returns the request status this decision resolves to.
    pub fn as_status(&self) -> RequestStatus {
        match self {
            Decision::Accepted => RequestStatus::Accepted,
            Decision::Rejected => RequestStatus::Rejected,
        }
    }
}

/// Meeting request aggregate - one proposed appointment.
///
/// # Invariants
///
/// - `requester` and `requestee` are different participants
/// - `slot_start < slot_end`
/// - Status changes only through the guarded mutations below
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRequest {
    /// Unique identifier for this request.
    id: MeetingRequestId,

    /// Event both participants belong to.
    event_id: EventId,

    /// Participant asking for the meeting.
    requester: ParticipantRef,

    /// Participant whose slot is being requested.
    requestee: ParticipantRef,

    /// The requestee's sheet holding the targeted slot.
    sheet_id: SheetId,

    /// Start of the targeted slot.
    slot_start: Timestamp,

    /// End of the targeted slot.
    slot_end: Timestamp,

    /// Current lifecycle status.
    status: RequestStatus,

    /// When the request was created.
    created_at: Timestamp,

    /// When the request was resolved, if it has been.
    responded_at: Option<Timestamp>,
}

impl MeetingRequest {
    /// Create a new pending request for a slot on the requestee's sheet.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if requester and requestee are the same
    ///   participant, or the slot span is not a forward interval
    pub fn new(
        id: MeetingRequestId,
        event_id: EventId,
        requester: ParticipantRef,
        requestee: ParticipantRef,
        sheet_id: SheetId,
        span: SlotSpan,
    ) -> Result<Self, DomainError> {
        if requester.id == requestee.id {
            return Err(DomainError::validation(
                "requestee",
                "Cannot request a slot on your own sheet",
            ));
        }
        if !span.start().is_before(&span.end()) {
            return Err(DomainError::validation(
                "slot_end",
                "Slot end must be after slot start",
            ));
        }

        Ok(Self {
            id,
            event_id,
            requester,
            requestee,
            sheet_id,
            slot_start: span.start(),
            slot_end: span.end(),
            status: RequestStatus::Pending,
            created_at: Timestamp::now(),
            responded_at: None,
        })
    }

    /// Reconstitute a request from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: MeetingRequestId,
        event_id: EventId,
        requester: ParticipantRef,
        requestee: ParticipantRef,
        sheet_id: SheetId,
        slot_start: Timestamp,
        slot_end: Timestamp,
        status: RequestStatus,
        created_at: Timestamp,
        responded_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            event_id,
            requester,
            requestee,
            sheet_id,
            slot_start,
            slot_end,
            status,
            created_at,
            responded_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the request ID.
    pub fn id(&self) -> &MeetingRequestId {
        &self.id
    }

    /// Returns the event this request belongs to.
    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Returns the participant asking for the meeting.
    pub fn requester(&self) -> &ParticipantRef {
        &self.requester
    }

    /// Returns the participant whose slot is requested.
    pub fn requestee(&self) -> &ParticipantRef {
        &self.requestee
    }

    /// Returns the sheet holding the targeted slot.
    pub fn sheet_id(&self) -> &SheetId {
        &self.sheet_id
    }

    /// Returns the start of the targeted slot.
    pub fn slot_start(&self) -> Timestamp {
        self.slot_start
    }

    /// Returns the end of the targeted slot.
    pub fn slot_end(&self) -> Timestamp {
        self.slot_end
    }

    /// Returns the targeted slot span.
    pub fn span(&self) -> SlotSpan {
        SlotSpan::new(self.slot_start, self.slot_end)
    }

    /// Returns the calendar day the meeting would take place on.
    pub fn meeting_date(&self) -> NaiveDate {
        self.slot_start.date()
    }

    /// Returns the current status.
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Returns when the request was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the request was resolved, if it has been.
    pub fn responded_at(&self) -> Option<&Timestamp> {
        self.responded_at.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given participant is the requester.
    pub fn is_requester(&self, participant_id: &ParticipantId) -> bool {
        &self.requester.id == participant_id
    }

    /// Checks if the given participant is the requestee.
    pub fn is_requestee(&self, participant_id: &ParticipantId) -> bool {
        &self.requestee.id == participant_id
    }

    /// Checks if the given participant is either party.
    pub fn involves(&self, participant_id: &ParticipantId) -> bool {
        self.is_requester(participant_id) || self.is_requestee(participant_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolves the request with the requestee's decision.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the responder is not the requestee
    /// - `AlreadyResolved` if the request is no longer pending
    pub fn respond(
        &mut self,
        responder: &ParticipantId,
        decision: Decision,
    ) -> Result<(), DomainError> {
        if !self.is_requestee(responder) {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the requested participant may respond",
            ));
        }
        self.ensure_pending()?;

        self.status = decision.as_status();
        self.responded_at = Some(Timestamp::now());
        Ok(())
    }

    /// Withdraws the request before the requestee responds.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the caller is not the requester
    /// - `AlreadyResolved` if the request is no longer pending
    pub fn cancel(&mut self, caller: &ParticipantId) -> Result<(), DomainError> {
        if !self.is_requester(caller) {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the requester may cancel a request",
            ));
        }
        self.ensure_pending()?;

        self.status = RequestStatus::Cancelled;
        self.responded_at = Some(Timestamp::now());
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_pending(&self) -> Result<(), DomainError> {
        if self.status.is_pending() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::AlreadyResolved,
                "Request has already been resolved",
            )
            .with_detail("status", self.status.to_string()))
        }
    }
}
