//! HTTP adapter for schedule endpoints.
//!
//! Exposes sheet generation, slot visibility, and slot listings over REST.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{
    ErrorResponse, ListSlotsParams, SetVisibilityRequest, SheetResponse, SlotListResponse,
    SlotResponse, VisibilityResponse,
};
pub use handlers::ScheduleHandlers;
pub use routes::schedule_routes;
