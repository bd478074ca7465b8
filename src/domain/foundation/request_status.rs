//! Meeting request status state machine.
//!
//! Defines all possible request states and valid transitions
//! according to the booking lifecycle.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a meeting request.
///
/// A request is created pending and resolves exactly once. All
/// resolved states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting a decision from the requestee. The targeted slot is
    /// held as requested while the request is pending.
    #[default]
    Pending,

    /// Requestee accepted. The targeted slot is booked.
    Accepted,

    /// Requestee declined. The targeted slot returns to available.
    Rejected,

    /// Requester withdrew before a response. The targeted slot
    /// returns to available.
    Cancelled,
}

impl RequestStatus {
    /// Returns true if the request is still awaiting a decision.
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }

    /// Returns true if the request has reached a final state.
    pub fn is_resolved(&self) -> bool {
        !self.is_pending()
    }

    /// Returns true if this resolution returns the targeted slot
    /// to available.
    pub fn frees_slot(&self) -> bool {
        matches!(self, RequestStatus::Rejected | RequestStatus::Cancelled)
    }
}

impl StateMachine for RequestStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RequestStatus::*;
        matches!(
            (self, target),
            (Pending, Accepted) | (Pending, Rejected) | (Pending, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RequestStatus::*;
        match self {
            Pending => vec![Accepted, Rejected, Cancelled],
            Accepted => vec![],
            Rejected => vec![],
            Cancelled => vec![],
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", s)
    }
}
