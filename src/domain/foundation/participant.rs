//! Participant identity value objects.
//!
//! Participants come in two kinds, exhibitors and visitors. Every operation
//! that addresses a participant carries the kind alongside the id, so lookups
//! dispatch on a typed enum instead of a stringly-named registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParticipantId;

/// The role a participant holds at an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantKind {
    Exhibitor,
    Visitor,
}

impl ParticipantKind {
    /// Returns the storage representation of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantKind::Exhibitor => "exhibitor",
            ParticipantKind::Visitor => "visitor",
        }
    }
}

impl fmt::Display for ParticipantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParticipantKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exhibitor" => Ok(ParticipantKind::Exhibitor),
            "visitor" => Ok(ParticipantKind::Visitor),
            other => Err(format!("unknown participant kind: {}", other)),
        }
    }
}

/// A fully qualified participant reference: id plus kind.
///
/// Exhibitor and visitor ids live in separate registries, so an id alone
/// does not identify a participant; the pair does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantRef {
    pub id: ParticipantId,
    pub kind: ParticipantKind,
}

impl ParticipantRef {
    /// Creates a participant reference.
    pub fn new(id: ParticipantId, kind: ParticipantKind) -> Self {
        Self { id, kind }
    }

    /// Convenience constructor for an exhibitor reference.
    pub fn exhibitor(id: ParticipantId) -> Self {
        Self::new(id, ParticipantKind::Exhibitor)
    }

    /// Convenience constructor for a visitor reference.
    pub fn visitor(id: ParticipantId) -> Self {
        Self::new(id, ParticipantKind::Visitor)
    }
}

impl fmt::Display for ParticipantRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}
