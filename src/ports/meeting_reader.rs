//! Meeting reader port (read side).
//!
//! Read-only queries over meeting requests for calendar and inbox
//! views. Kept separate from the write repository so dashboards never
//! touch the guarded transition path.

use crate::domain::foundation::{DomainError, EventId, ParticipantId};
use crate::domain::meeting::MeetingRequest;
use async_trait::async_trait;

/// Read-only port for meeting queries.
#[async_trait]
pub trait MeetingReader: Send + Sync {
    /// All accepted requests involving the participant as either party,
    /// ordered by slot start.
    ///
    /// When `event_id` is given, restricted to that event.
    async fn confirmed_meetings(
        &self,
        participant_id: &ParticipantId,
        event_id: Option<&EventId>,
    ) -> Result<Vec<MeetingRequest>, DomainError>;

    /// Pending requests addressed to the participant, ordered by
    /// creation time. These are the ones the participant can act on.
    async fn pending_for_requestee(
        &self,
        participant_id: &ParticipantId,
        event_id: Option<&EventId>,
    ) -> Result<Vec<MeetingRequest>, DomainError>;

    /// Pending requests the participant sent, ordered by creation
    /// time. Informational; only the requestee can resolve them.
    async fn pending_from_requester(
        &self,
        participant_id: &ParticipantId,
        event_id: Option<&EventId>,
    ) -> Result<Vec<MeetingRequest>, DomainError>;
}
