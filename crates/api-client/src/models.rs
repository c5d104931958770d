//! Wire models
//!
//! Records exchanged with the booking service. The service is document-store
//! backed, so ids travel as `_id` and field names are camelCase.

use serde::{Deserialize, Serialize};

use crate::ApiError;

/// A place a trip can start or end at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Display name (e.g., "Mars")
    pub name: String,
    /// Distance from the sun, in km
    pub distance_from_sun: f64,
}

impl Location {
    /// Create a location record
    pub fn new(id: impl Into<String>, name: impl Into<String>, distance_from_sun: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            distance_from_sun,
        }
    }
}

/// A way of travelling between locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportMode {
    /// Unique identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Display name (e.g., "SpaceX 19001")
    pub name: String,
    /// Price charged per km travelled
    pub price_per_km: f64,
}

impl TransportMode {
    /// Create a transport mode record
    pub fn new(id: impl Into<String>, name: impl Into<String>, price_per_km: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_per_km,
        }
    }
}

/// Standard `{status, message, data}` response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Application status code
    pub status: u16,
    /// Human-readable message
    pub message: Option<String>,
    /// Payload
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// A successful envelope carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            status: 200,
            message: None,
            data: Some(data),
        }
    }

    /// A rejection envelope without data
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Check if the envelope reports success (2xx status)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Unwrap the payload, turning rejections and empty envelopes into errors
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(ApiError::Api {
                status: self.status,
                message: self.message,
            });
        }
        self.data
            .ok_or_else(|| ApiError::MissingData("response envelope has no data".to_string()))
    }
}

/// Lifecycle of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum BookingStatus {
    /// Submitted, not yet confirmed
    Pending,
    /// Confirmed, departure in the future
    Upcoming,
    /// Trip taken
    Completed,
    /// Cancelled by the user or operator
    Canceled,
}

impl From<String> for BookingStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "upcoming" => Self::Upcoming,
            "completed" => Self::Completed,
            "canceled" | "cancelled" => Self::Canceled,
            _ => Self::Pending,
        }
    }
}

impl BookingStatus {
    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Upcoming => "upcoming",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }
}

/// Payload for creating a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Departure timestamp (ISO 8601)
    pub departure_time: String,
    /// Quoted price
    pub total_price: f64,
    /// Transport mode name
    pub transportation_mode: String,
    /// Origin location name
    pub from: String,
    /// Destination location name
    pub to: String,
    /// Booking status; new bookings are always pending
    pub status: BookingStatus,
}

/// A booking from the user's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Booking identifier
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    /// Origin location name
    pub from: String,
    /// Destination location name
    pub to: String,
    /// Transport mode name
    pub transportation_mode: String,
    /// Departure timestamp (ISO 8601)
    pub departure_time: String,
    /// Price paid
    #[serde(default)]
    pub total_price: Option<f64>,
    /// Current status
    pub status: BookingStatus,
}

/// Login credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// Session tokens issued at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Short-lived bearer token
    pub access_token: String,
    /// Token used to obtain a new access token
    pub refresh_token: String,
}
