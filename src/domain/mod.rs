//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `event` - The scheduling-relevant projection of an event (date/time window)
//! - `scheduling` - Slot generation and the per-participant slot sheet
//! - `meeting` - Meeting request lifecycle and resolution

pub mod event;
pub mod foundation;
pub mod meeting;
pub mod scheduling;
