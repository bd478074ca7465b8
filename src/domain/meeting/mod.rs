//! Meeting domain module.
//!
//! Meeting requests and their lifecycle. A request is created pending
//! against one slot on the requestee's sheet and resolves exactly once;
//! the slot's state is derived from the resolution.

mod errors;
mod request;

pub use errors::MeetingError;
pub use request::{Decision, MeetingRequest};
