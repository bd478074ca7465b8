//! In-Memory Adapters
//!
//! Implementations of the persistence and collaborator ports backed by
//! in-process state, for testing and development.
//!
//! ## Available Adapters
//!
//! - **InMemorySlotSheetRepository** - Sheets with serialized slot transitions
//! - **InMemoryMeetingRequestRepository** - Requests; also serves the read-side queries
//! - **InMemoryEventDirectory** - Event windows and registrations
//! - **InMemoryConnectionGate** - Connection lookups
//! - **InMemoryAttendanceLog** - Check-in days
//! - **InMemoryNotifier** - Records notifications instead of delivering
//! - **InMemoryParticipantRepository** - Display name lookups

mod attendance_log;
mod connection_gate;
mod event_directory;
mod meeting_request_repository;
mod notifier;
mod participant_repository;
mod sheet_repository;

pub use attendance_log::InMemoryAttendanceLog;
pub use connection_gate::InMemoryConnectionGate;
pub use event_directory::InMemoryEventDirectory;
pub use meeting_request_repository::InMemoryMeetingRequestRepository;
pub use notifier::{InMemoryNotifier, SentNotification};
pub use participant_repository::InMemoryParticipantRepository;
pub use sheet_repository::InMemorySlotSheetRepository;
