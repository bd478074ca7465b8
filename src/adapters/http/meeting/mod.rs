//! HTTP adapter for meeting request endpoints.
//!
//! Exposes the booking lifecycle over REST: requesting a slot,
//! responding, cancelling, and the confirmed/pending listings.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{
    AgendaResponse, CreateMeetingRequest, DayScheduleResponse, ErrorResponse, MeetingListParams,
    MeetingResponse, PendingResponse, RespondRequest,
};
pub use handlers::MeetingHandlers;
pub use routes::meeting_routes;
