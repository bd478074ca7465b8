//! Authentication types for the domain layer.
//!
//! These types represent an authenticated participant extracted from a
//! bearer token. They have no provider dependencies - whichever identity
//! provider the deployment uses populates them via the `SessionValidator`
//! port.

use super::ParticipantRef;
use thiserror::Error;

/// Authenticated participant extracted from a validated token.
#[derive(Debug, Clone)]
pub struct AuthenticatedParticipant {
    /// The participant identity carried by the token.
    pub participant: ParticipantRef,

    /// Display name if the token carries one.
    pub display_name: Option<String>,
}

impl AuthenticatedParticipant {
    /// Creates a new authenticated participant.
    ///
    /// Typically called by the `SessionValidator` adapter after
    /// successfully validating a token.
    pub fn new(participant: ParticipantRef, display_name: Option<String>) -> Self {
        Self {
            participant,
            display_name,
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
