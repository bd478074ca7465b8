//! Slot sheet aggregate entity.
//!
//! A sheet is one participant's bookable calendar for one event. Its
//! slots are generated in full when the sheet is created and are only
//! ever mutated in place afterwards, never regenerated.
//!
//! # Ownership
//!
//! The owning participant controls visibility. Slot state changes flow
//! through meeting requests, never through direct edits.

use crate::domain::event::EventWindow;
use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, MeetingRequestId, ParticipantId, ParticipantRef, SheetId,
    Timestamp,
};
use serde::{Deserialize, Serialize};

use super::generator;
use super::slot::{Slot, SlotSpan};

/// Slot sheet aggregate - one participant's calendar for one event.
///
/// # Invariants
///
/// - At most one sheet exists per (participant, event) pair
/// - Slots are chronological and non-overlapping
/// - A slot is mutated only through its state guards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSheet {
    /// Unique identifier for this sheet.
    id: SheetId,

    /// Participant who owns this sheet.
    owner: ParticipantRef,

    /// Event the sheet belongs to.
    event_id: EventId,

    /// Whether counterparts may see this sheet's slots.
    show_slots: bool,

    /// Every bookable slot for the event, in chronological order.
    slots: Vec<Slot>,

    /// When the sheet was created.
    created_at: Timestamp,

    /// When the sheet's settings were last changed.
    updated_at: Timestamp,
}

impl SlotSheet {
    /// Create a sheet with the full slot list for the event window.
    ///
    /// All slots start available. The sheet starts hidden; the owner
    /// opts in to visibility explicitly.
    pub fn new(id: SheetId, owner: ParticipantRef, event_id: EventId, window: &EventWindow) -> Self {
        let slots = generator::generate(window)
            .into_iter()
            .map(Slot::available)
            .collect();

        let now = Timestamp::now();
        Self {
            id,
            owner,
            event_id,
            show_slots: false,
            slots,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a sheet from persistence (no validation).
    pub fn reconstitute(
        id: SheetId,
        owner: ParticipantRef,
        event_id: EventId,
        show_slots: bool,
        slots: Vec<Slot>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            event_id,
            show_slots,
            slots,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the sheet ID.
    pub fn id(&self) -> &SheetId {
        &self.id
    }

    /// Returns the owning participant.
    pub fn owner(&self) -> &ParticipantRef {
        &self.owner
    }

    /// Returns the event this sheet belongs to.
    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    /// Returns whether counterparts may see this sheet's slots.
    pub fn show_slots(&self) -> bool {
        self.show_slots
    }

    /// Returns all slots in chronological order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns the number of slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns when the sheet was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the sheet's settings were last changed.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given participant owns this sheet.
    pub fn is_owner(&self, participant_id: &ParticipantId) -> bool {
        &self.owner.id == participant_id
    }

    /// Validates that the participant may manage this sheet.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the participant is not the owner
    pub fn authorize_owner(&self, participant_id: &ParticipantId) -> Result<(), DomainError> {
        if self.is_owner(participant_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Forbidden,
                "Participant does not own this sheet",
            ))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the slot starting at the given instant, if any.
    pub fn slot_at(&self, start: Timestamp) -> Option<&Slot> {
        self.slots.iter().find(|s| s.start() == start)
    }

    /// Returns the slot exactly matching the given span, if any.
    pub fn slot_matching(&self, span: &SlotSpan) -> Option<&Slot> {
        self.slots.iter().find(|s| s.span() == *span)
    }

    /// Returns the slots currently open for booking.
    pub fn available_slots(&self) -> Vec<Slot> {
        self.slots.iter().filter(|s| s.is_available()).copied().collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Sets whether counterparts may see this sheet's slots.
    ///
    /// A pure flag flip; slot state is untouched.
    pub fn set_visibility(&mut self, show: bool) {
        self.show_slots = show;
        self.updated_at = Timestamp::now();
    }

    /// Holds the slot matching `span` for a new pending request.
    ///
    /// # Errors
    ///
    /// - `SlotUnavailable` if no slot matches the span, or the slot
    ///   is already requested or booked
    pub fn claim_slot(
        &mut self,
        span: SlotSpan,
        request_id: MeetingRequestId,
    ) -> Result<(), DomainError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|s| s.span() == span)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::SlotUnavailable, "No slot matches the requested span")
                    .with_detail("slot_start", span.start().to_string())
            })?;

        slot.claim(request_id)
    }

    /// Confirms the slot held by `request_id` at `start`.
    ///
    /// # Errors
    ///
    /// - `InconsistentState` if no slot starts at `start`, or the slot
    ///   is not held by the given request
    pub fn book_slot(
        &mut self,
        start: Timestamp,
        request_id: MeetingRequestId,
    ) -> Result<(), DomainError> {
        let slot = self.slot_at_mut(start, request_id)?;
        slot.book(request_id)
    }

    /// Reopens the slot held by `request_id` at `start`.
    ///
    /// # Errors
    ///
    /// - `InconsistentState` if no slot starts at `start`, or the slot
    ///   is not held by the given request
    pub fn release_slot(
        &mut self,
        start: Timestamp,
        request_id: MeetingRequestId,
    ) -> Result<(), DomainError> {
        let slot = self.slot_at_mut(start, request_id)?;
        slot.release(request_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn slot_at_mut(
        &mut self,
        start: Timestamp,
        request_id: MeetingRequestId,
    ) -> Result<&mut Slot, DomainError> {
        self.slots.iter_mut().find(|s| s.start() == start).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InconsistentState,
                "No slot found for the resolved request",
            )
            .with_detail("slot_start", start.to_string())
            .with_detail("meeting_request_id", request_id.to_string())
        })
    }
}
