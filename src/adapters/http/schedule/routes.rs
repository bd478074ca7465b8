//! HTTP routes for schedule endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{generate_sheet, list_slots, set_visibility, ScheduleHandlers};

/// Creates the schedule router with all endpoints.
pub fn schedule_routes(handlers: ScheduleHandlers) -> Router {
    Router::new()
        .route("/events/:event_id/sheet", post(generate_sheet))
        .route(
            "/events/:event_id/participants/:participant_id/slots",
            get(list_slots),
        )
        .route("/sheets/:sheet_id/visibility", patch(set_visibility))
        .with_state(handlers)
}
