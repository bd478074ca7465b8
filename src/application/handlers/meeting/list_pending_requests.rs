//! ListPendingRequestsHandler - Query handler for the request inbox.

use std::sync::Arc;

use crate::domain::foundation::{EventId, ParticipantId};
use crate::domain::meeting::{MeetingError, MeetingRequest};
use crate::ports::MeetingReader;

/// Query for the open requests around a participant.
#[derive(Debug, Clone)]
pub struct ListPendingRequestsQuery {
    pub participant_id: ParticipantId,
    /// When set, restricts the inbox to one event.
    pub event_id: Option<EventId>,
}

/// Result of an inbox query.
///
/// `actionable` holds requests addressed to the participant; these are
/// the ones they can accept or reject. `sent` holds the participant's
/// own outgoing requests, which only the other party can resolve.
#[derive(Debug, Clone)]
pub struct ListPendingRequestsResult {
    pub actionable: Vec<MeetingRequest>,
    pub sent: Vec<MeetingRequest>,
}

/// Handler for inbox queries.
pub struct ListPendingRequestsHandler {
    reader: Arc<dyn MeetingReader>,
}

impl ListPendingRequestsHandler {
    pub fn new(reader: Arc<dyn MeetingReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: ListPendingRequestsQuery,
    ) -> Result<ListPendingRequestsResult, MeetingError> {
        let actionable = self
            .reader
            .pending_for_requestee(&query.participant_id, query.event_id.as_ref())
            .await?;
        let sent = self
            .reader
            .pending_from_requester(&query.participant_id, query.event_id.as_ref())
            .await?;

        Ok(ListPendingRequestsResult { actionable, sent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryMeetingRequestRepository;
    use crate::domain::foundation::{
        MeetingRequestId, ParticipantRef, RequestStatus, SheetId, Timestamp,
    };
    use crate::domain::scheduling::SlotSpan;
    use crate::ports::MeetingRequestRepository;

    fn pending_request(
        event_id: EventId,
        requester: ParticipantRef,
        requestee: ParticipantRef,
    ) -> MeetingRequest {
        let start = Timestamp::now();
        MeetingRequest::new(
            MeetingRequestId::new(),
            event_id,
            requester,
            requestee,
            SheetId::new(),
            SlotSpan::new(start, start.plus_minutes(30)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn the_inbox_splits_incoming_from_outgoing() {
        let store = Arc::new(InMemoryMeetingRequestRepository::new());
        let event_id = EventId::new();
        let exhibitor = ParticipantRef::exhibitor(ParticipantId::new());
        let visitor = ParticipantRef::visitor(ParticipantId::new());

        let incoming = pending_request(event_id, visitor, exhibitor);
        let outgoing = pending_request(event_id, exhibitor, visitor);
        store.create(&incoming).await.unwrap();
        store.create(&outgoing).await.unwrap();

        let result = ListPendingRequestsHandler::new(store)
            .handle(ListPendingRequestsQuery {
                participant_id: exhibitor.id,
                event_id: None,
            })
            .await
            .unwrap();

        assert_eq!(result.actionable.len(), 1);
        assert_eq!(result.actionable[0].id(), incoming.id());
        assert_eq!(result.sent.len(), 1);
        assert_eq!(result.sent[0].id(), outgoing.id());
    }

    #[tokio::test]
    async fn resolved_requests_leave_the_inbox() {
        let store = Arc::new(InMemoryMeetingRequestRepository::new());
        let event_id = EventId::new();
        let exhibitor = ParticipantRef::exhibitor(ParticipantId::new());
        let visitor = ParticipantRef::visitor(ParticipantId::new());

        let open = pending_request(event_id, visitor, exhibitor);
        let resolved = pending_request(event_id, visitor, exhibitor);
        store.create(&open).await.unwrap();
        store.create(&resolved).await.unwrap();
        store
            .resolve(resolved.id(), RequestStatus::Rejected, Timestamp::now())
            .await
            .unwrap();

        let result = ListPendingRequestsHandler::new(store)
            .handle(ListPendingRequestsQuery {
                participant_id: exhibitor.id,
                event_id: None,
            })
            .await
            .unwrap();

        assert_eq!(result.actionable.len(), 1);
        assert_eq!(result.actionable[0].id(), open.id());
    }

    #[tokio::test]
    async fn an_event_filter_scopes_the_inbox() {
        let store = Arc::new(InMemoryMeetingRequestRepository::new());
        let exhibitor = ParticipantRef::exhibitor(ParticipantId::new());
        let visitor = ParticipantRef::visitor(ParticipantId::new());
        let event_id = EventId::new();

        let scoped = pending_request(event_id, visitor, exhibitor);
        let elsewhere = pending_request(EventId::new(), visitor, exhibitor);
        store.create(&scoped).await.unwrap();
        store.create(&elsewhere).await.unwrap();

        let result = ListPendingRequestsHandler::new(store)
            .handle(ListPendingRequestsQuery {
                participant_id: exhibitor.id,
                event_id: Some(event_id),
            })
            .await
            .unwrap();

        assert_eq!(result.actionable.len(), 1);
        assert_eq!(result.actionable[0].id(), scoped.id());
    }
}
