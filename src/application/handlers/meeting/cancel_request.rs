//! CancelRequestHandler - Command handler for withdrawing a pending request.

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::foundation::{MeetingRequestId, ParticipantId, RequestStatus, Timestamp};
use crate::domain::meeting::{MeetingError, MeetingRequest};
use crate::ports::{MeetingRequestRepository, Notifier, ParticipantRepository, SlotSheetRepository};

/// Command to cancel a pending meeting request.
#[derive(Debug, Clone)]
pub struct CancelRequestCommand {
    pub request_id: MeetingRequestId,
    pub caller: ParticipantId,
}

/// Result of a cancellation.
#[derive(Debug, Clone)]
pub struct CancelRequestResult {
    pub request: MeetingRequest,
}

/// Handler for cancellations.
pub struct CancelRequestHandler {
    requests: Arc<dyn MeetingRequestRepository>,
    sheets: Arc<dyn SlotSheetRepository>,
    participants: Arc<dyn ParticipantRepository>,
    notifier: Arc<dyn Notifier>,
}

impl CancelRequestHandler {
    pub fn new(
        requests: Arc<dyn MeetingRequestRepository>,
        sheets: Arc<dyn SlotSheetRepository>,
        participants: Arc<dyn ParticipantRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            requests,
            sheets,
            participants,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: CancelRequestCommand,
    ) -> Result<CancelRequestResult, MeetingError> {
        // 1. Load the request
        let mut request = self
            .requests
            .find_by_id(&cmd.request_id)
            .await?
            .ok_or_else(|| MeetingError::request_not_found(cmd.request_id))?;

        // 2. Only the requester may withdraw, and only while pending;
        //    an accepted meeting stays booked
        request.cancel(&cmd.caller)?;
        let responded_at = request.responded_at().copied().unwrap_or_else(Timestamp::now);

        // 3. Guarded resolution to cancelled
        let resolved = self
            .requests
            .resolve(&cmd.request_id, RequestStatus::Cancelled, responded_at)
            .await?;
        if !resolved {
            return Err(MeetingError::AlreadyResolved(
                "Request was resolved by a concurrent response".to_string(),
            ));
        }

        // 4. Release the claimed slot
        if let Err(err) = self
            .sheets
            .release_slot(request.sheet_id(), request.slot_start(), *request.id())
            .await
        {
            error!(
                meeting_request_id = %request.id(),
                sheet_id = %request.sheet_id(),
                error = %err,
                "Slot release failed after cancellation"
            );
            return Err(err.into());
        }

        // 5. Notify the requestee; delivery failures never fail the cancel
        self.notify_requestee(&request).await;

        Ok(CancelRequestResult { request })
    }

    async fn notify_requestee(&self, request: &MeetingRequest) {
        let requester_name = self
            .participants
            .display_name(request.requester())
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| "A participant".to_string());
        let body = format!(
            "{} cancelled their meeting request for {}",
            requester_name,
            request.slot_start()
        );
        if let Err(err) = self
            .notifier
            .notify(&request.requestee().id, "Meeting request cancelled", &body)
            .await
        {
            warn!(
                meeting_request_id = %request.id(),
                error = %err,
                "Failed to notify requestee"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryMeetingRequestRepository, InMemoryNotifier, InMemoryParticipantRepository,
        InMemorySlotSheetRepository,
    };
    use crate::domain::event::EventWindow;
    use crate::domain::foundation::{EventId, ParticipantRef, SheetId, SlotState};
    use crate::domain::scheduling::{SlotSheet, SlotSpan};
    use chrono::{NaiveDate, NaiveTime};

    fn test_window() -> EventWindow {
        EventWindow::new(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            30,
        )
        .unwrap()
    }

    struct Fixture {
        sheets: Arc<InMemorySlotSheetRepository>,
        requests: Arc<InMemoryMeetingRequestRepository>,
        notifier: Arc<InMemoryNotifier>,
        requester: ParticipantRef,
        requestee: ParticipantRef,
        sheet: SlotSheet,
        span: SlotSpan,
        request: MeetingRequest,
    }

    async fn fixture() -> Fixture {
        let event_id = EventId::new();
        let requester = ParticipantRef::visitor(ParticipantId::new());
        let requestee = ParticipantRef::exhibitor(ParticipantId::new());
        let sheet = SlotSheet::new(SheetId::new(), requestee, event_id, &test_window());
        let span = sheet.slots()[0].span();
        let request = MeetingRequest::new(
            MeetingRequestId::new(),
            event_id,
            requester,
            requestee,
            *sheet.id(),
            span,
        )
        .unwrap();

        let sheets = Arc::new(InMemorySlotSheetRepository::new());
        sheets.save(&sheet).await.unwrap();
        sheets
            .claim_slot(sheet.id(), span, *request.id())
            .await
            .unwrap();
        let requests = Arc::new(InMemoryMeetingRequestRepository::new());
        requests.create(&request).await.unwrap();

        Fixture {
            sheets,
            requests,
            notifier: Arc::new(InMemoryNotifier::new()),
            requester,
            requestee,
            sheet,
            span,
            request,
        }
    }

    fn handler(fx: &Fixture) -> CancelRequestHandler {
        CancelRequestHandler::new(
            fx.requests.clone(),
            fx.sheets.clone(),
            Arc::new(InMemoryParticipantRepository::new()),
            fx.notifier.clone(),
        )
    }

    async fn slot_state(fx: &Fixture) -> SlotState {
        fx.sheets
            .find_by_id(fx.sheet.id())
            .await
            .unwrap()
            .unwrap()
            .slot_at(fx.span.start())
            .unwrap()
            .state()
    }

    async fn stored_status(fx: &Fixture) -> RequestStatus {
        fx.requests
            .find_by_id(fx.request.id())
            .await
            .unwrap()
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn cancelling_frees_the_slot_and_notifies_the_requestee() {
        let fx = fixture().await;

        let result = handler(&fx)
            .handle(CancelRequestCommand {
                request_id: *fx.request.id(),
                caller: fx.requester.id,
            })
            .await
            .unwrap();

        assert_eq!(result.request.status(), RequestStatus::Cancelled);
        assert_eq!(stored_status(&fx).await, RequestStatus::Cancelled);
        assert_eq!(slot_state(&fx).await, SlotState::Available);

        let sent = fx.notifier.sent_notifications();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, fx.requestee.id);
    }

    #[tokio::test]
    async fn cancelled_is_recorded_distinctly_from_rejected() {
        let fx = fixture().await;

        handler(&fx)
            .handle(CancelRequestCommand {
                request_id: *fx.request.id(),
                caller: fx.requester.id,
            })
            .await
            .unwrap();

        let status = stored_status(&fx).await;
        assert_eq!(status, RequestStatus::Cancelled);
        assert_ne!(status, RequestStatus::Rejected);
    }

    #[tokio::test]
    async fn only_the_requester_may_cancel() {
        let fx = fixture().await;

        let result = handler(&fx)
            .handle(CancelRequestCommand {
                request_id: *fx.request.id(),
                caller: fx.requestee.id,
            })
            .await;

        assert!(matches!(result, Err(MeetingError::Forbidden(_))));
        assert_eq!(stored_status(&fx).await, RequestStatus::Pending);
        assert_eq!(slot_state(&fx).await, SlotState::Requested(*fx.request.id()));
    }

    #[tokio::test]
    async fn an_accepted_request_cannot_be_cancelled() {
        let fx = fixture().await;
        fx.requests
            .resolve(fx.request.id(), RequestStatus::Accepted, Timestamp::now())
            .await
            .unwrap();
        fx.sheets
            .book_slot(fx.sheet.id(), fx.span.start(), *fx.request.id())
            .await
            .unwrap();

        let result = handler(&fx)
            .handle(CancelRequestCommand {
                request_id: *fx.request.id(),
                caller: fx.requester.id,
            })
            .await;

        assert!(matches!(result, Err(MeetingError::AlreadyResolved(_))));
        // The booking is untouched
        assert_eq!(stored_status(&fx).await, RequestStatus::Accepted);
        assert_eq!(slot_state(&fx).await, SlotState::Booked(*fx.request.id()));
    }

    #[tokio::test]
    async fn unknown_request_is_reported() {
        let fx = fixture().await;

        let result = handler(&fx)
            .handle(CancelRequestCommand {
                request_id: MeetingRequestId::new(),
                caller: fx.requester.id,
            })
            .await;

        assert!(matches!(result, Err(MeetingError::RequestNotFound(_))));
    }

    #[tokio::test]
    async fn notification_failure_does_not_fail_the_cancel() {
        let fx = fixture().await;
        let handler = CancelRequestHandler::new(
            fx.requests.clone(),
            fx.sheets.clone(),
            Arc::new(InMemoryParticipantRepository::new()),
            Arc::new(InMemoryNotifier::failing()),
        );

        let result = handler
            .handle(CancelRequestCommand {
                request_id: *fx.request.id(),
                caller: fx.requester.id,
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(slot_state(&fx).await, SlotState::Available);
    }
}
