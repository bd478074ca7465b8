//! Event domain module.
//!
//! The event itself is managed elsewhere; this module carries only the
//! scheduling-relevant projection of it, the date and time window that
//! slot sheets are generated from.

mod window;

pub use window::{EventWindow, DEFAULT_SLOT_INTERVAL_MINUTES};
