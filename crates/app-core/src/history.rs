//! Booking history
//!
//! The signed-in user's past and upcoming bookings, grouped by status for the
//! "my trips" tabs.

use api_client::{BookingRecord, BookingService, BookingStatus};

/// Bookings fetched from the service, in service order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingHistory {
    records: Vec<BookingRecord>,
}

impl BookingHistory {
    /// Fetch the history
    pub async fn load(service: &dyn BookingService) -> api_client::Result<Self> {
        let records = service.list_bookings().await.map_err(|e| {
            tracing::warn!("Failed to load booking history: {}", e);
            e
        })?;
        tracing::debug!("Loaded {} bookings", records.len());
        Ok(Self { records })
    }

    /// Build a history from records already at hand
    pub fn from_records(records: Vec<BookingRecord>) -> Self {
        Self { records }
    }

    /// All bookings
    pub fn records(&self) -> &[BookingRecord] {
        &self.records
    }

    /// Bookings with the given status
    pub fn with_status(&self, status: BookingStatus) -> Vec<&BookingRecord> {
        self.records.iter().filter(|r| r.status == status).collect()
    }

    /// Number of bookings with the given status
    pub fn count(&self, status: BookingStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    /// Number of bookings
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no bookings
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
