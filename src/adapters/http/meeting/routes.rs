//! HTTP routes for meeting request endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_meeting, create_meeting, list_confirmed, list_pending, respond_to_meeting,
    MeetingHandlers,
};

/// Creates the meeting router with all endpoints.
pub fn meeting_routes(handlers: MeetingHandlers) -> Router {
    Router::new()
        .route("/meetings", post(create_meeting))
        .route("/meetings/confirmed", get(list_confirmed))
        .route("/meetings/pending", get(list_pending))
        .route("/meetings/:id/respond", post(respond_to_meeting))
        .route("/meetings/:id/cancel", post(cancel_meeting))
        .with_state(handlers)
}
