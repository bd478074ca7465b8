//! Meeting request handlers.
//!
//! Commands drive the request lifecycle from creation through
//! resolution or withdrawal; queries feed agendas and inboxes.

mod cancel_request;
mod list_confirmed_meetings;
mod list_pending_requests;
mod request_slot;
mod respond_to_request;

pub use cancel_request::{CancelRequestCommand, CancelRequestHandler, CancelRequestResult};
pub use list_confirmed_meetings::{
    DaySchedule, ListConfirmedMeetingsHandler, ListConfirmedMeetingsQuery,
    ListConfirmedMeetingsResult,
};
pub use list_pending_requests::{
    ListPendingRequestsHandler, ListPendingRequestsQuery, ListPendingRequestsResult,
};
pub use request_slot::{RequestSlotCommand, RequestSlotHandler, RequestSlotResult};
pub use respond_to_request::{
    RespondToRequestCommand, RespondToRequestHandler, RespondToRequestResult,
};
