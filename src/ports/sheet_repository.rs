//! Slot sheet repository port.
//!
//! Defines the contract for persisting sheets and for the guarded slot
//! state transitions that serialize concurrent booking attempts.
//!
//! # Design
//!
//! Slots are addressed by `(sheet_id, slot_start)`. Every state change
//! is a compare-and-set against the expected current state, so two
//! callers racing for the same slot cannot both succeed. Implementations
//! must make each guarded update atomic; they must never re-read and
//! re-write a whole sheet around a slot change.

use crate::domain::foundation::{
    DomainError, EventId, MeetingRequestId, ParticipantId, SheetId, Timestamp,
};
use crate::domain::scheduling::{SlotSheet, SlotSpan};
use async_trait::async_trait;

/// Repository port for slot sheet persistence and slot transitions.
#[async_trait]
pub trait SlotSheetRepository: Send + Sync {
    /// Save a newly created sheet with its full slot list.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, sheet: &SlotSheet) -> Result<(), DomainError>;

    /// Find a sheet by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SheetId) -> Result<Option<SlotSheet>, DomainError>;

    /// Find the sheet owned by a participant for an event.
    ///
    /// Returns `None` if the participant has no sheet for the event.
    async fn find_by_owner(
        &self,
        event_id: &EventId,
        owner_id: &ParticipantId,
    ) -> Result<Option<SlotSheet>, DomainError>;

    /// All sheets for an event. Used by the reconciliation sweep.
    async fn find_by_event(&self, event_id: &EventId) -> Result<Vec<SlotSheet>, DomainError>;

    /// Set whether the sheet's slots are visible to counterparts.
    ///
    /// # Errors
    ///
    /// - `SheetNotFound` if the sheet doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn set_visibility(&self, id: &SheetId, show: bool) -> Result<(), DomainError>;

    /// Atomically move the slot matching `span` from available to
    /// requested, held by `request_id`.
    ///
    /// This is the only entry point for claiming a slot; when two
    /// callers race for the same slot, exactly one claim succeeds.
    ///
    /// # Errors
    ///
    /// - `SlotUnavailable` if no slot matches the span or it is not
    ///   available at the moment of the update
    /// - `DatabaseError` on persistence failure
    async fn claim_slot(
        &self,
        id: &SheetId,
        span: SlotSpan,
        request_id: MeetingRequestId,
    ) -> Result<(), DomainError>;

    /// Atomically move the slot at `slot_start` from requested to
    /// booked, guarded on it being held by `request_id`.
    ///
    /// # Errors
    ///
    /// - `InconsistentState` if the slot is missing or not held by
    ///   the given request
    /// - `DatabaseError` on persistence failure
    async fn book_slot(
        &self,
        id: &SheetId,
        slot_start: Timestamp,
        request_id: MeetingRequestId,
    ) -> Result<(), DomainError>;

    /// Atomically move the slot at `slot_start` from requested back to
    /// available, guarded on it being held by `request_id`.
    ///
    /// # Errors
    ///
    /// - `InconsistentState` if the slot is missing or not held by
    ///   the given request
    /// - `DatabaseError` on persistence failure
    async fn release_slot(
        &self,
        id: &SheetId,
        slot_start: Timestamp,
        request_id: MeetingRequestId,
    ) -> Result<(), DomainError>;
}
