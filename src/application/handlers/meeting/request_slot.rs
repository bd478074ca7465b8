//! RequestSlotHandler - Command handler for requesting a meeting slot.
//!
//! The claim on the slot is the race arbiter: the slot moves to
//! requested before the request row exists, and a failed request write
//! releases the claim so no slot mutation survives a failed operation.

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::foundation::{EventId, MeetingRequestId, ParticipantRef, Timestamp};
use crate::domain::meeting::{MeetingError, MeetingRequest};
use crate::domain::scheduling::SlotSpan;
use crate::ports::{
    ConnectionGate, MeetingRequestRepository, Notifier, ParticipantRepository, SlotSheetRepository,
};

/// Command to request a meeting slot on another participant's sheet.
#[derive(Debug, Clone)]
pub struct RequestSlotCommand {
    pub event_id: EventId,
    pub requester: ParticipantRef,
    pub requestee: ParticipantRef,
    pub slot_start: Timestamp,
    pub slot_end: Timestamp,
}

/// Result of a successful slot request.
#[derive(Debug, Clone)]
pub struct RequestSlotResult {
    pub request: MeetingRequest,
}

/// Handler for slot requests.
pub struct RequestSlotHandler {
    sheets: Arc<dyn SlotSheetRepository>,
    requests: Arc<dyn MeetingRequestRepository>,
    connections: Arc<dyn ConnectionGate>,
    participants: Arc<dyn ParticipantRepository>,
    notifier: Arc<dyn Notifier>,
}

impl RequestSlotHandler {
    pub fn new(
        sheets: Arc<dyn SlotSheetRepository>,
        requests: Arc<dyn MeetingRequestRepository>,
        connections: Arc<dyn ConnectionGate>,
        participants: Arc<dyn ParticipantRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            sheets,
            requests,
            connections,
            participants,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: RequestSlotCommand) -> Result<RequestSlotResult, MeetingError> {
        // 1. Requests only flow between connected participants
        let connected = self
            .connections
            .has_connection(&cmd.event_id, &cmd.requester.id, &cmd.requestee.id)
            .await?;
        if !connected {
            return Err(MeetingError::forbidden(
                "No connection between the participants",
            ));
        }

        // 2. The requestee must have a sheet for this event
        let sheet = self
            .sheets
            .find_by_owner(&cmd.event_id, &cmd.requestee.id)
            .await?
            .ok_or_else(MeetingError::no_sheet_for_requestee)?;

        // 3. Build the pending request
        let span = SlotSpan::new(cmd.slot_start, cmd.slot_end);
        let request = MeetingRequest::new(
            MeetingRequestId::new(),
            cmd.event_id,
            cmd.requester,
            cmd.requestee,
            *sheet.id(),
            span,
        )?;

        // 4. Claim the slot; when two requesters race, exactly one claim lands
        self.sheets
            .claim_slot(sheet.id(), span, *request.id())
            .await?;

        // 5. Persist the request, releasing the claim if the write fails
        if let Err(err) = self.requests.create(&request).await {
            if let Err(release_err) = self
                .sheets
                .release_slot(sheet.id(), span.start(), *request.id())
                .await
            {
                error!(
                    meeting_request_id = %request.id(),
                    error = %release_err,
                    "Failed to release claimed slot after request write failure"
                );
            }
            return Err(err.into());
        }

        // 6. Notify the requestee; delivery failures never fail the request
        self.notify_requestee(&request).await;

        Ok(RequestSlotResult { request })
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
            "{} requested a meeting at {}",
            requester_name,
            request.slot_start()
        );
        if let Err(err) = self
            .notifier
            .notify(&request.requestee().id, "New meeting request", &body)
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
