//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session validation (JWT, mock)
//! - `http` - Axum routes, handlers, and middleware
//! - `memory` - In-memory implementations for testing and development
//! - `notification` - Notification delivery
//! - `postgres` - PostgreSQL repositories

pub mod auth;
pub mod http;
pub mod memory;
pub mod notification;
pub mod postgres;

pub use memory::{
    InMemoryAttendanceLog, InMemoryConnectionGate, InMemoryEventDirectory,
    InMemoryMeetingRequestRepository, InMemoryNotifier, InMemoryParticipantRepository,
    InMemorySlotSheetRepository, SentNotification,
};
