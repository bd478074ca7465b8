//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresSlotSheetRepository` - Sheet persistence with guarded slot transitions
//! - `PostgresMeetingRequestRepository` - Request persistence with guarded resolution
//! - `PostgresMeetingReader` - Read-optimized agenda and inbox queries
//! - Read-only adapters onto the event, connection, attendance, and
//!   participant tables owned by other parts of the system

mod attendance_log;
mod connection_gate;
mod event_directory;
mod meeting_reader;
mod meeting_request_repository;
mod participant_repository;
mod sheet_repository;

pub use attendance_log::PostgresAttendanceLog;
pub use connection_gate::PostgresConnectionGate;
pub use event_directory::PostgresEventDirectory;
pub use meeting_reader::PostgresMeetingReader;
pub use meeting_request_repository::PostgresMeetingRequestRepository;
pub use participant_repository::PostgresParticipantRepository;
pub use sheet_repository::PostgresSlotSheetRepository;
