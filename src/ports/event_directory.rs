//! Event directory port.
//!
//! The event aggregate is managed outside this service; scheduling only
//! needs its window and its registration roster. This port is the
//! boundary to that collaborator.

use crate::domain::event::EventWindow;
use crate::domain::foundation::{DomainError, EventId, ParticipantRef};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Read-only port onto the event collaborator.
#[async_trait]
pub trait EventDirectory: Send + Sync {
    /// The event's scheduling window.
    ///
    /// Returns `None` if the event doesn't exist.
    async fn event_window(&self, event_id: &EventId) -> Result<Option<EventWindow>, DomainError>;

    /// Whether the participant is registered for the event.
    async fn is_participant_registered(
        &self,
        event_id: &EventId,
        participant: &ParticipantRef,
    ) -> Result<bool, DomainError>;

    /// Events whose scheduling window has not closed as of the given day.
    ///
    /// Feeds maintenance sweeps that only care about events still in play.
    async fn active_event_ids(&self, as_of: NaiveDate) -> Result<Vec<EventId>, DomainError>;
}
