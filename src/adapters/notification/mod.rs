//! Notification adapters.
//!
//! Implementations of the `Notifier` port:
//!
//! - `http` - Production adapter posting to the platform's notification
//!   service

mod http;

pub use http::{HttpNotifier, HttpNotifierConfig};
