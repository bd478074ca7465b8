//! RespondToRequestHandler - Command handler for accepting or rejecting a request.
//!
//! The request is resolved first by guarded transition, then the slot
//! is moved to its derived state. A slot failure after resolution is
//! surfaced, never masked; the reconciliation sweep finishes the slot
//! side later.

use std::sync::Arc;

use tracing::{error, warn};

use crate::domain::foundation::{MeetingRequestId, ParticipantId, RequestStatus, Timestamp};
use crate::domain::meeting::{Decision, MeetingError, MeetingRequest};
use crate::ports::{MeetingRequestRepository, Notifier, ParticipantRepository, SlotSheetRepository};

/// Command to resolve a pending meeting request.
#[derive(Debug, Clone)]
pub struct RespondToRequestCommand {
    pub request_id: MeetingRequestId,
    pub responder: ParticipantId,
    pub decision: Decision,
}

/// Result of a resolution.
#[derive(Debug, Clone)]
pub struct RespondToRequestResult {
    pub request: MeetingRequest,
}

/// Handler for request resolution.
pub struct RespondToRequestHandler {
    requests: Arc<dyn MeetingRequestRepository>,
    sheets: Arc<dyn SlotSheetRepository>,
    participants: Arc<dyn ParticipantRepository>,
    notifier: Arc<dyn Notifier>,
}

impl RespondToRequestHandler {
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
        cmd: RespondToRequestCommand,
    ) -> Result<RespondToRequestResult, MeetingError> {
        // 1. Load the request
        let mut request = self
            .requests
            .find_by_id(&cmd.request_id)
            .await?
            .ok_or_else(|| MeetingError::request_not_found(cmd.request_id))?;

        // 2. Validate responder and pending status on the aggregate
        request.respond(&cmd.responder, cmd.decision)?;
        let responded_at = request.responded_at().copied().unwrap_or_else(Timestamp::now);

        // 3. Guarded resolution; a concurrent responder loses here
        let resolved = self
            .requests
            .resolve(&cmd.request_id, request.status(), responded_at)
            .await?;
        if !resolved {
            return Err(MeetingError::AlreadyResolved(
                "Request was resolved by a concurrent response".to_string(),
            ));
        }

        // 4. Move the slot to its derived state. The request stays
        //    resolved even if this fails
        let slot_update = match cmd.decision {
            Decision::Accepted => {
                self.sheets
                    .book_slot(request.sheet_id(), request.slot_start(), *request.id())
                    .await
            }
            Decision::Rejected => {
                self.sheets
                    .release_slot(request.sheet_id(), request.slot_start(), *request.id())
                    .await
            }
        };
        if let Err(err) = slot_update {
            error!(
                meeting_request_id = %request.id(),
                sheet_id = %request.sheet_id(),
                error = %err,
                "Slot update failed after request resolution"
            );
            return Err(err.into());
        }

        // 5. Notify the requester; delivery failures never fail the response
        self.notify_requester(&request).await;

        Ok(RespondToRequestResult { request })
    }

    async fn notify_requester(&self, request: &MeetingRequest) {
        let responder_name = self
            .participants
            .display_name(request.requestee())
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| "The participant".to_string());
        let verdict = match request.status() {
            RequestStatus::Accepted => "accepted",
            _ => "declined",
        };
        let body = format!(
            "{} {} your meeting request for {}",
            responder_name,
            verdict,
            request.slot_start()
        );
        if let Err(err) = self
            .notifier
            .notify(&request.requester().id, "Meeting request update", &body)
            .await
        {
            warn!(
                meeting_request_id = %request.id(),
                error = %err,
                "Failed to notify requester"
            );
        }
    }
}
