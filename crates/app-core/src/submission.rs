//! Booking submission
//!
//! Turns a ready draft into a booking request, sends it to the booking
//! service once, and maps whatever comes back into a [`BookingOutcome`].
//! No error escapes as a panic or a transport error.

use std::sync::Arc;

use api_client::{BookingRequest, BookingService, BookingStatus};
use app_state::ReferenceDataCache;
use chrono::NaiveDate;
use thiserror::Error;

use crate::draft::BookingDraft;
use crate::outcome::{BookingConfirmation, BookingOutcome, ErrorKind, DEFAULT_FAILURE_MESSAGE};
use crate::validation::is_non_empty;

/// Departure date errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateBuildError {
    /// The day/month/year triple is not a calendar date
    #[error("Invalid departure date: day {day}, month {month}, year {year}")]
    InvalidDate {
        /// Day of month
        day: u32,
        /// Month of year
        month: u32,
        /// Year
        year: u32,
    },
}

/// Default departure builder: midnight UTC, millisecond ISO 8601
///
/// # Example
///
/// ```
/// use app_core::submission::iso_departure;
///
/// assert_eq!(iso_departure(1, 1, 2160).unwrap(), "2160-01-01T00:00:00.000Z");
/// assert!(iso_departure(31, 4, 2160).is_err());
/// ```
pub fn iso_departure(day: u32, month: u32, year: u32) -> Result<String, DateBuildError> {
    let invalid = || DateBuildError::InvalidDate { day, month, year };

    let year_number = i32::try_from(year).map_err(|_| invalid())?;
    let date = NaiveDate::from_ymd_opt(year_number, month, day).ok_or_else(invalid)?;

    Ok(date.format("%Y-%m-%dT00:00:00.000Z").to_string())
}

/// Submits drafts to the booking service
pub struct BookingSubmission {
    service: Arc<dyn BookingService>,
}

impl BookingSubmission {
    /// Create a submission handler
    pub fn new(service: Arc<dyn BookingService>) -> Self {
        Self { service }
    }

    /// Submit a draft
    ///
    /// The draft's readiness is checked again here, so a stale "submit
    /// enabled" state in the host cannot reach the service. The service is
    /// called at most once; its rejection message is passed through, falling
    /// back to [`DEFAULT_FAILURE_MESSAGE`].
    ///
    /// `build_departure` receives `(day, month, year)`; [`iso_departure`] is
    /// the usual choice.
    pub async fn submit<D>(
        &self,
        draft: &BookingDraft,
        cache: &ReferenceDataCache,
        build_departure: D,
    ) -> BookingOutcome
    where
        D: Fn(u32, u32, u32) -> Result<String, DateBuildError>,
    {
        let Some(trip) = draft.resolve(cache) else {
            tracing::warn!("Booking submitted before the draft was ready");
            return BookingOutcome::failure(
                ErrorKind::InvalidState,
                "Select an origin, a different destination and a transport mode before booking",
            );
        };

        let departure_iso = match build_departure(draft.day(), draft.month(), draft.year()) {
            Ok(departure) => departure,
            Err(e) => return BookingOutcome::failure(ErrorKind::InvalidInput, e.to_string()),
        };

        let price = match trip.price() {
            Ok(price) => price,
            Err(e) => return BookingOutcome::failure(ErrorKind::InvalidInput, e.to_string()),
        };

        let payload = BookingRequest {
            departure_time: departure_iso.clone(),
            total_price: price,
            transportation_mode: trip.mode.name.clone(),
            from: trip.origin.name.clone(),
            to: trip.destination.name.clone(),
            status: BookingStatus::Pending,
        };

        let confirmation = BookingConfirmation {
            mode_name: trip.mode.name.clone(),
            origin_name: trip.origin.name.clone(),
            destination_name: trip.destination.name.clone(),
            departure_iso,
            price,
        };

        tracing::debug!(
            "Booking {} -> {} by {}",
            confirmation.origin_name,
            confirmation.destination_name,
            confirmation.mode_name
        );

        match self.service.create(payload).await {
            Ok(envelope) if envelope.is_success() => {
                tracing::info!(
                    "Booked {} -> {} for {}",
                    confirmation.origin_name,
                    confirmation.destination_name,
                    confirmation.price
                );
                BookingOutcome::Success { confirmation }
            }
            Ok(envelope) => {
                tracing::warn!("Booking rejected with status {}", envelope.status);
                rejected(envelope.message)
            }
            Err(e) => {
                tracing::warn!("Booking failed: {}", e);
                rejected(e.reported_message())
            }
        }
    }
}

fn rejected(message: Option<String>) -> BookingOutcome {
    let message = message
        .filter(|m| is_non_empty(m))
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
    BookingOutcome::failure(ErrorKind::RemoteRejected, message)
}
