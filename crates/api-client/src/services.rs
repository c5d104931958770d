//! Collaborator traits
//!
//! The booking workflow never talks HTTP directly; it consumes these traits.
//! [`RestClient`] implements all of them against the REST API, and tests
//! substitute doubles.

use async_trait::async_trait;

use crate::models::{
    ApiEnvelope, AuthTokens, BookingRecord, BookingRequest, Credentials, Location, TransportMode,
};
use crate::rest::RestClient;
use crate::Result;

/// Header carrying the access token on a successful login
pub const ACCESS_TOKEN_HEADER: &str = "access_token";

/// Header carrying the refresh token on a successful login
pub const REFRESH_TOKEN_HEADER: &str = "refresh_token";

/// Lists the locations trips can start or end at
#[async_trait]
pub trait LocationService: Send + Sync {
    /// Fetch all locations, in service order
    async fn list_locations(&self) -> Result<Vec<Location>>;
}

/// Lists the available transport modes
#[async_trait]
pub trait TransportModeService: Send + Sync {
    /// Fetch all transport modes, in service order
    async fn list_modes(&self) -> Result<Vec<TransportMode>>;
}

/// Creates and lists bookings
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Submit a booking
    ///
    /// The returned envelope may still report a rejection through its
    /// `status`; only transport-level failures are errors.
    async fn create(&self, payload: BookingRequest) -> Result<ApiEnvelope<serde_json::Value>>;

    /// Fetch the current user's bookings
    async fn list_bookings(&self) -> Result<Vec<BookingRecord>>;
}

/// Outcome of a login call
#[derive(Debug, Clone, PartialEq)]
pub struct LoginResponse {
    /// Response envelope
    pub envelope: ApiEnvelope<serde_json::Value>,
    /// Tokens from the response headers, when both were present
    pub tokens: Option<AuthTokens>,
}

/// Authenticates users
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for session tokens
    async fn login(&self, credentials: Credentials) -> Result<LoginResponse>;
}

#[async_trait]
impl LocationService for RestClient {
    async fn list_locations(&self) -> Result<Vec<Location>> {
        let response = self.get(&self.config().endpoints.locations).await?;
        response.envelope.into_data()
    }
}

#[async_trait]
impl TransportModeService for RestClient {
    async fn list_modes(&self) -> Result<Vec<TransportMode>> {
        let response = self
            .get(&self.config().endpoints.transportation_modes)
            .await?;
        response.envelope.into_data()
    }
}

#[async_trait]
impl BookingService for RestClient {
    async fn create(&self, payload: BookingRequest) -> Result<ApiEnvelope<serde_json::Value>> {
        let response = self.post(&self.config().endpoints.bookings, &payload).await?;
        Ok(response.envelope)
    }

    async fn list_bookings(&self) -> Result<Vec<BookingRecord>> {
        let response = self.get(&self.config().endpoints.bookings).await?;
        response.envelope.into_data()
    }
}

#[async_trait]
impl AuthService for RestClient {
    async fn login(&self, credentials: Credentials) -> Result<LoginResponse> {
        let response = self.post(&self.config().endpoints.login, &credentials).await?;

        let tokens = match (
            response.header(ACCESS_TOKEN_HEADER),
            response.header(REFRESH_TOKEN_HEADER),
        ) {
            (Some(access), Some(refresh)) => Some(AuthTokens {
                access_token: access.clone(),
                refresh_token: refresh.clone(),
            }),
            _ => None,
        };

        Ok(LoginResponse {
            envelope: response.envelope,
            tokens,
        })
    }
}
