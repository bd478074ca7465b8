//! HTTP handlers for meeting request endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::meeting::{
    CancelRequestCommand, CancelRequestHandler, ListConfirmedMeetingsHandler,
    ListConfirmedMeetingsQuery, ListPendingRequestsHandler, ListPendingRequestsQuery,
    RequestSlotCommand, RequestSlotHandler, RespondToRequestCommand, RespondToRequestHandler,
};
use crate::domain::foundation::{MeetingRequestId, ParticipantRef, Timestamp};
use crate::domain::meeting::MeetingError;

use super::dto::{
    AgendaResponse, CreateMeetingRequest, ErrorResponse, MeetingListParams, MeetingResponse,
    PendingResponse, RespondRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct MeetingHandlers {
    request_handler: Arc<RequestSlotHandler>,
    respond_handler: Arc<RespondToRequestHandler>,
    cancel_handler: Arc<CancelRequestHandler>,
    confirmed_handler: Arc<ListConfirmedMeetingsHandler>,
    pending_handler: Arc<ListPendingRequestsHandler>,
}

impl MeetingHandlers {
    pub fn new(
        request_handler: Arc<RequestSlotHandler>,
        respond_handler: Arc<RespondToRequestHandler>,
        cancel_handler: Arc<CancelRequestHandler>,
        confirmed_handler: Arc<ListConfirmedMeetingsHandler>,
        pending_handler: Arc<ListPendingRequestsHandler>,
    ) -> Self {
        Self {
            request_handler,
            respond_handler,
            cancel_handler,
            confirmed_handler,
            pending_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/meetings - Request a meeting slot
pub async fn create_meeting(
    State(handlers): State<MeetingHandlers>,
    RequireAuth(caller): RequireAuth,
    Json(req): Json<CreateMeetingRequest>,
) -> Response {
    let cmd = RequestSlotCommand {
        event_id: req.event_id,
        requester: caller.participant,
        requestee: ParticipantRef::new(req.requestee_id, req.requestee_kind),
        slot_start: Timestamp::from_datetime(req.slot_start),
        slot_end: Timestamp::from_datetime(req.slot_end),
    };

    match handlers.request_handler.handle(cmd).await {
        Ok(result) => {
            let response: MeetingResponse = result.request.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_meeting_error(e),
    }
}

/// POST /api/meetings/:id/respond - Accept or reject a pending request
pub async fn respond_to_meeting(
    State(handlers): State<MeetingHandlers>,
    RequireAuth(caller): RequireAuth,
    Path(request_id): Path<String>,
    Json(req): Json<RespondRequest>,
) -> Response {
    let request_id = match request_id.parse::<MeetingRequestId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid request ID")),
            )
                .into_response()
        }
    };

    let cmd = RespondToRequestCommand {
        request_id,
        responder: caller.participant.id,
        decision: req.decision,
    };

    match handlers.respond_handler.handle(cmd).await {
        Ok(result) => {
            let response: MeetingResponse = result.request.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_meeting_error(e),
    }
}

/// POST /api/meetings/:id/cancel - Withdraw a pending request
pub async fn cancel_meeting(
    State(handlers): State<MeetingHandlers>,
    RequireAuth(caller): RequireAuth,
    Path(request_id): Path<String>,
) -> Response {
    let request_id = match request_id.parse::<MeetingRequestId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid request ID")),
            )
                .into_response()
        }
    };

    let cmd = CancelRequestCommand {
        request_id,
        caller: caller.participant.id,
    };

    match handlers.cancel_handler.handle(cmd).await {
        Ok(result) => {
            let response: MeetingResponse = result.request.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_meeting_error(e),
    }
}

/// GET /api/meetings/confirmed - The caller's confirmed agenda, grouped by day
pub async fn list_confirmed(
    State(handlers): State<MeetingHandlers>,
    RequireAuth(caller): RequireAuth,
    Query(params): Query<MeetingListParams>,
) -> Response {
    let query = ListConfirmedMeetingsQuery {
        participant_id: caller.participant.id,
        event_id: params.event_id,
    };

    match handlers.confirmed_handler.handle(query).await {
        Ok(result) => {
            let response: AgendaResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_meeting_error(e),
    }
}

/// GET /api/meetings/pending - The caller's open requests, incoming and outgoing
pub async fn list_pending(
    State(handlers): State<MeetingHandlers>,
    RequireAuth(caller): RequireAuth,
    Query(params): Query<MeetingListParams>,
) -> Response {
    let query = ListPendingRequestsQuery {
        participant_id: caller.participant.id,
        event_id: params.event_id,
    };

    match handlers.pending_handler.handle(query).await {
        Ok(result) => {
            let response: PendingResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_meeting_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_meeting_error(error: MeetingError) -> Response {
    match error {
        MeetingError::SheetNotFound(msg) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(msg)),
        )
            .into_response(),
        MeetingError::RequestNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!(
                "Meeting request not found: {}",
                id
            ))),
        )
            .into_response(),
        MeetingError::Forbidden(msg) => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden(msg)),
        )
            .into_response(),
        MeetingError::SlotUnavailable(msg) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(msg)),
        )
            .into_response(),
        MeetingError::AlreadyResolved(msg) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(msg)),
        )
            .into_response(),
        MeetingError::InconsistentState(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(format!(
                "Request and slot state disagree: {}",
                msg
            ))),
        )
            .into_response(),
        MeetingError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        MeetingError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}
