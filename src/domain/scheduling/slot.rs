//! Slot value objects.
//!
//! A slot is one bookable time window on a participant's sheet. Slots
//! are generated in full when the sheet is created and only ever change
//! state afterwards.

use crate::domain::foundation::{DomainError, MeetingRequestId, SlotState, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time span of one slot, produced by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotSpan {
    start: Timestamp,
    end: Timestamp,
}

impl SlotSpan {
    /// Creates a span. Callers are expected to pass `start < end`;
    /// the generator always does.
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Returns the span start.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Returns the span end.
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Returns the calendar day the span starts on.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

impl fmt::Display for SlotSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// One bookable time window on a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    start: Timestamp,
    end: Timestamp,
    state: SlotState,
}

impl Slot {
    /// Creates an open slot for a freshly generated span.
    pub fn available(span: SlotSpan) -> Self {
        Self {
            start: span.start(),
            end: span.end(),
            state: SlotState::Available,
        }
    }

    /// Reconstitute a slot from persistence.
    pub fn reconstitute(start: Timestamp, end: Timestamp, state: SlotState) -> Self {
        Self { start, end, state }
    }

    /// Returns the slot start.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// Returns the slot end.
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Returns the slot's span.
    pub fn span(&self) -> SlotSpan {
        SlotSpan::new(self.start, self.end)
    }

    /// Returns the slot's booking state.
    pub fn state(&self) -> SlotState {
        self.state
    }

    /// Returns the calendar day the slot falls on.
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Returns true if the slot can be claimed by a new request.
    pub fn is_available(&self) -> bool {
        self.state.is_available()
    }

    /// Holds the slot for a new pending request.
    pub fn claim(&mut self, request_id: MeetingRequestId) -> Result<(), DomainError> {
        self.state = self.state.claim(request_id)?;
        Ok(())
    }

    /// Confirms the slot for its accepted request.
    pub fn book(&mut self, request_id: MeetingRequestId) -> Result<(), DomainError> {
        self.state = self.state.book(request_id)?;
        Ok(())
    }

    /// Reopens the slot when its request is rejected or cancelled.
    pub fn release(&mut self, request_id: MeetingRequestId) -> Result<(), DomainError> {
        self.state = self.state.release(request_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use chrono::NaiveDate;

    fn span(hour: u32, minute: u32) -> SlotSpan {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let start = Timestamp::from_naive_utc(
            date.and_hms_opt(hour, minute, 0).unwrap(),
        );
        SlotSpan::new(start, start.plus_minutes(30))
    }

    #[test]
    fn available_slot_starts_unclaimed() {
        let slot = Slot::available(span(9, 0));
        assert!(slot.is_available());
        assert_eq!(slot.state().request_id(), None);
    }

    #[test]
    fn claim_then_book_moves_through_states() {
        let request_id = MeetingRequestId::new();
        let mut slot = Slot::available(span(9, 0));

        slot.claim(request_id).unwrap();
        assert_eq!(slot.state(), SlotState::Requested(request_id));

        slot.book(request_id).unwrap();
        assert_eq!(slot.state(), SlotState::Booked(request_id));
    }

    #[test]
    fn claim_fails_on_held_slot() {
        let mut slot = Slot::available(span(9, 0));
        slot.claim(MeetingRequestId::new()).unwrap();

        let err = slot.claim(MeetingRequestId::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotUnavailable);
    }

    #[test]
    fn release_reopens_the_slot() {
        let request_id = MeetingRequestId::new();
        let mut slot = Slot::available(span(9, 0));

        slot.claim(request_id).unwrap();
        slot.release(request_id).unwrap();

        assert!(slot.is_available());
    }

    #[test]
    fn failed_transition_leaves_state_unchanged() {
        let holder = MeetingRequestId::new();
        let mut slot = Slot::available(span(9, 0));
        slot.claim(holder).unwrap();

        let result = slot.book(MeetingRequestId::new());
        assert!(result.is_err());
        assert_eq!(slot.state(), SlotState::Requested(holder));
    }

    #[test]
    fn date_is_the_start_day() {
        let slot = Slot::available(span(9, 0));
        assert_eq!(slot.date(), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
    }
}
