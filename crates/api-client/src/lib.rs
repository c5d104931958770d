//! REST client library for the Cosmic Voyage booking service
//!
//! This crate provides the wire models, the HTTP transport, the collaborator
//! traits consumed by the booking workflow, and the shared token store.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod models;
pub mod rest;
pub mod services;
pub mod session;

pub use models::{
    ApiEnvelope, AuthTokens, BookingRecord, BookingRequest, BookingStatus, Credentials, Location,
    TransportMode,
};
pub use rest::{ApiClientConfig, ApiEndpoints, ApiResponse, RestClient};
pub use services::{
    AuthService, BookingService, LocationService, LoginResponse, TransportModeService,
};
pub use session::TokenStore;

/// Result type for REST operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Error types for REST operations
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("Network error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a status outside the success range
    #[error("API error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Api {
        /// Status code (envelope status when present, HTTP status otherwise)
        status: u16,
        /// Human-readable reason reported by the service
        message: Option<String>,
    },

    /// A successful envelope carried no `data`
    #[error("Missing data: {0}")]
    MissingData(String),

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Create an API rejection
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: Some(message.into()),
        }
    }

    /// Status code for API rejections
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The message this error reports to a user
    ///
    /// API rejections report the service's own message (which may be absent);
    /// every other error reports its description.
    pub fn reported_message(&self) -> Option<String> {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => Some(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
