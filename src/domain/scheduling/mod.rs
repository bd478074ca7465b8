//! Scheduling domain module.
//!
//! Slot generation and the per-participant slot sheet. The sheet owns
//! booking state; the meeting module owns the requests that drive it.

mod errors;
pub mod generator;
mod sheet;
mod slot;

pub use errors::ScheduleError;
pub use sheet::SlotSheet;
pub use slot::{Slot, SlotSpan};
