//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `SlotSheetRepository` - Sheet persistence and guarded slot transitions
//! - `MeetingRequestRepository` - Request persistence and guarded resolution
//! - `MeetingReader` - Read-only meeting queries for calendar/inbox views
//!
//! ## Collaborator Ports
//!
//! - `EventDirectory` - Event window and registration roster
//! - `ConnectionGate` - Who may view/request whose slots
//! - `AttendanceLog` - Check-in days for attendance-aware filtering
//! - `ParticipantRepository` - Display-name lookup by typed participant kind
//! - `Notifier` - Fire-and-forget booking notifications
//!
//! ## Auth Ports
//!
//! - `SessionValidator` - Bearer token validation for HTTP middleware

mod attendance_log;
mod connection_gate;
mod event_directory;
mod meeting_reader;
mod meeting_request_repository;
mod notifier;
mod participant_repository;
mod session_validator;
mod sheet_repository;

pub use attendance_log::AttendanceLog;
pub use connection_gate::ConnectionGate;
pub use event_directory::EventDirectory;
pub use meeting_reader::MeetingReader;
pub use meeting_request_repository::MeetingRequestRepository;
pub use notifier::Notifier;
pub use participant_repository::ParticipantRepository;
pub use session_validator::SessionValidator;
pub use sheet_repository::SlotSheetRepository;
