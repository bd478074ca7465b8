//! Expomeet - Meeting Scheduling Backend for Expo Events
//!
//! This crate implements the slot-sheet scheduling and booking engine that
//! lets paired attendees of a trade-fair event reserve meeting slots with
//! each other during the event's run.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
