//! HTTP handlers for schedule endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::schedule::{
    GenerateSheetCommand, GenerateSheetHandler, ListAvailableSlotsHandler,
    ListAvailableSlotsQuery, SetSlotVisibilityCommand, SetSlotVisibilityHandler,
};
use crate::domain::foundation::{EventId, ParticipantId, SheetId};
use crate::domain::scheduling::ScheduleError;

use super::dto::{
    ErrorResponse, ListSlotsParams, SetVisibilityRequest, SheetResponse, SlotListResponse,
    VisibilityResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ScheduleHandlers {
    generate_handler: Arc<GenerateSheetHandler>,
    visibility_handler: Arc<SetSlotVisibilityHandler>,
    list_handler: Arc<ListAvailableSlotsHandler>,
}

impl ScheduleHandlers {
    pub fn new(
        generate_handler: Arc<GenerateSheetHandler>,
        visibility_handler: Arc<SetSlotVisibilityHandler>,
        list_handler: Arc<ListAvailableSlotsHandler>,
    ) -> Self {
        Self {
            generate_handler,
            visibility_handler,
            list_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/events/:event_id/sheet - Create the caller's slot sheet
///
/// Returns the existing sheet when the caller already has one for this
/// event, so the endpoint is safe to call repeatedly.
pub async fn generate_sheet(
    State(handlers): State<ScheduleHandlers>,
    RequireAuth(caller): RequireAuth,
    Path(event_id): Path<String>,
) -> Response {
    let event_id = match event_id.parse::<EventId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid event ID")),
            )
                .into_response()
        }
    };

    let cmd = GenerateSheetCommand {
        event_id,
        owner: caller.participant,
    };

    match handlers.generate_handler.handle(cmd).await {
        Ok(result) => {
            let status = if result.created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            let response: SheetResponse = result.sheet.into();
            (status, Json(response)).into_response()
        }
        Err(e) => handle_schedule_error(e),
    }
}

/// GET /api/events/:event_id/participants/:participant_id/slots - View a participant's slots
pub async fn list_slots(
    State(handlers): State<ScheduleHandlers>,
    RequireAuth(caller): RequireAuth,
    Path((event_id, participant_id)): Path<(String, String)>,
    Query(params): Query<ListSlotsParams>,
) -> Response {
    let event_id = match event_id.parse::<EventId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid event ID")),
            )
                .into_response()
        }
    };
    let owner_id = match participant_id.parse::<ParticipantId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid participant ID")),
            )
                .into_response()
        }
    };

    let query = ListAvailableSlotsQuery {
        event_id,
        owner_id,
        caller: caller.participant.id,
        attended_days_only: params.attended_days_only,
    };

    match handlers.list_handler.handle(query).await {
        Ok(result) => {
            let response: SlotListResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_schedule_error(e),
    }
}

/// PATCH /api/sheets/:sheet_id/visibility - Share or hide the sheet's slots
pub async fn set_visibility(
    State(handlers): State<ScheduleHandlers>,
    RequireAuth(caller): RequireAuth,
    Path(sheet_id): Path<String>,
    Json(req): Json<SetVisibilityRequest>,
) -> Response {
    let sheet_id = match sheet_id.parse::<SheetId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid sheet ID")),
            )
                .into_response()
        }
    };

    let cmd = SetSlotVisibilityCommand {
        sheet_id,
        caller: caller.participant.id,
        show: req.show_slots,
    };

    match handlers.visibility_handler.handle(cmd).await {
        Ok(result) => {
            let response = VisibilityResponse {
                sheet_id: result.sheet_id.to_string(),
                show_slots: result.show_slots,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_schedule_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_schedule_error(error: ScheduleError) -> Response {
    match error {
        ScheduleError::EventNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!("Event not found: {}", id))),
        )
            .into_response(),
        ScheduleError::SheetNotFound(msg) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(msg)),
        )
            .into_response(),
        ScheduleError::Forbidden(msg) => (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden(msg)),
        )
            .into_response(),
        ScheduleError::ValidationFailed { field, message } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!(
                "Validation failed for {}: {}",
                field, message
            ))),
        )
            .into_response(),
        ScheduleError::Infrastructure(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(msg)),
        )
            .into_response(),
    }
}
