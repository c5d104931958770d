//! Booking outcomes
//!
//! What a submission hands back to the host: either a confirmation to show
//! on the "booking confirmed" view, or a typed failure with a message to put
//! in an error banner.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message used when a collaborator fails without saying why
pub const DEFAULT_FAILURE_MESSAGE: &str = "Something went wrong";

/// Failure classes of the booking workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed arguments reached the pricing or date logic
    InvalidInput,
    /// Submit was attempted while the draft was not ready
    InvalidState,
    /// The booking service rejected the request or could not be reached
    RemoteRejected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidInput => "invalid input",
            Self::InvalidState => "invalid state",
            Self::RemoteRejected => "remote rejected",
        };
        write!(f, "{}", name)
    }
}

/// Details of a created booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// Transport mode name
    pub mode_name: String,
    /// Origin location name
    pub origin_name: String,
    /// Destination location name
    pub destination_name: String,
    /// Departure timestamp as sent to the service
    pub departure_iso: String,
    /// Quoted price
    pub price: f64,
}

impl BookingConfirmation {
    /// Departure date in short human form, e.g. "Mon Jan 01 2024"
    ///
    /// Returns `None` when the departure is not an RFC 3339 timestamp.
    pub fn departure_display(&self) -> Option<String> {
        DateTime::parse_from_rfc3339(&self.departure_iso)
            .ok()
            .map(|dt| dt.format("%a %b %d %Y").to_string())
    }
}

/// Result of a booking submission
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    /// The booking was created
    Success {
        /// What was booked
        confirmation: BookingConfirmation,
    },
    /// The booking was not created
    Failure {
        /// Failure class
        kind: ErrorKind,
        /// Message to show the user
        message: String,
    },
}

impl BookingOutcome {
    /// Create a failure outcome
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Whether the booking was created
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The confirmation, on success
    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        match self {
            Self::Success { confirmation } => Some(confirmation),
            Self::Failure { .. } => None,
        }
    }

    /// The failure class, on failure
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    /// The failure message, on failure
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message, .. } => Some(message),
        }
    }
}
