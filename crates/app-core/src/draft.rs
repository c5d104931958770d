//! Booking draft
//!
//! The selections a user makes while composing a booking. Readiness and the
//! live quote are derived from the draft and the reference data on every
//! call; neither is stored, so they cannot drift from the selections.

use api_client::{Location, TransportMode};
use app_state::ReferenceDataCache;
use serde::{Deserialize, Deserializer, Serialize};

use crate::pricing::{self, PricingEngine};
use crate::validation::is_non_empty;

/// Departure day a fresh draft starts with
pub const DEFAULT_DAY: u32 = 1;

/// Departure month a fresh draft starts with
pub const DEFAULT_MONTH: u32 = 1;

/// Departure year a fresh draft starts with
pub const DEFAULT_YEAR: u32 = 2160;

/// Booking selections
///
/// Day, month and year are free-form until submission; they are not checked
/// against the calendar here.
///
/// # Example
///
/// ```
/// use api_client::{Location, TransportMode};
/// use app_core::draft::BookingDraft;
/// use app_state::ReferenceDataCache;
///
/// let cache = ReferenceDataCache::from_records(
///     vec![Location::new("E", "Earth", 150.0), Location::new("M", "Mars", 228.0)],
///     vec![TransportMode::new("S1", "SpaceX", 2.0)],
/// );
///
/// let mut draft = BookingDraft::new();
/// draft.set_origin("E");
/// draft.set_destination("M");
/// assert!(!draft.is_ready_to_submit(&cache));
///
/// draft.set_mode("S1");
/// assert_eq!(draft.current_price(&cache), Some(156.0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    #[serde(default, deserialize_with = "deserialize_selection")]
    origin_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_selection")]
    destination_id: Option<String>,
    day: u32,
    month: u32,
    year: u32,
    #[serde(default, deserialize_with = "deserialize_selection")]
    mode_id: Option<String>,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self::new()
    }
}

/// The records a ready draft resolves to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTrip<'a> {
    /// Where the trip starts
    pub origin: &'a Location,
    /// Where the trip ends
    pub destination: &'a Location,
    /// How the trip is made
    pub mode: &'a TransportMode,
}

impl ResolvedTrip<'_> {
    /// Price of the trip
    pub fn price(&self) -> pricing::Result<f64> {
        PricingEngine::compute_price(Some(self.origin), Some(self.destination), Some(self.mode))
    }
}

impl BookingDraft {
    /// Creates an empty draft
    pub fn new() -> Self {
        Self {
            origin_id: None,
            destination_id: None,
            day: DEFAULT_DAY,
            month: DEFAULT_MONTH,
            year: DEFAULT_YEAR,
            mode_id: None,
        }
    }

    /// Selected origin id
    pub fn origin_id(&self) -> Option<&str> {
        self.origin_id.as_deref()
    }

    /// Selected destination id
    pub fn destination_id(&self) -> Option<&str> {
        self.destination_id.as_deref()
    }

    /// Selected transport mode id
    pub fn mode_id(&self) -> Option<&str> {
        self.mode_id.as_deref()
    }

    /// Departure day
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Departure month
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Departure year
    pub fn year(&self) -> u32 {
        self.year
    }

    /// Select the origin; an empty id clears it
    pub fn set_origin(&mut self, id: impl Into<String>) {
        self.origin_id = selection(id);
    }

    /// Select the destination; an empty id clears it
    pub fn set_destination(&mut self, id: impl Into<String>) {
        self.destination_id = selection(id);
    }

    /// Select the transport mode; an empty id clears it
    pub fn set_mode(&mut self, id: impl Into<String>) {
        self.mode_id = selection(id);
    }

    /// Clear the origin
    pub fn clear_origin(&mut self) {
        self.origin_id = None;
    }

    /// Clear the destination
    pub fn clear_destination(&mut self) {
        self.destination_id = None;
    }

    /// Clear the transport mode
    pub fn clear_mode(&mut self) {
        self.mode_id = None;
    }

    /// Set the departure day
    pub fn set_day(&mut self, day: u32) {
        self.day = day;
    }

    /// Set the departure month
    pub fn set_month(&mut self, month: u32) {
        self.month = month;
    }

    /// Set the departure year
    pub fn set_year(&mut self, year: u32) {
        self.year = year;
    }

    /// Return to a fresh draft
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Destinations the user may pick: every location but the origin
    pub fn destination_options<'a>(&self, cache: &'a ReferenceDataCache) -> Vec<&'a Location> {
        cache.available_destinations(self.origin_id())
    }

    /// The selected origin, if it resolves
    pub fn origin<'a>(&self, cache: &'a ReferenceDataCache) -> Option<&'a Location> {
        cache.lookup_location(self.origin_id()?)
    }

    /// Resolve the selections against the cache
    ///
    /// `Some` exactly when the draft is ready to submit.
    pub fn resolve<'a>(&self, cache: &'a ReferenceDataCache) -> Option<ResolvedTrip<'a>> {
        let origin_id = self.origin_id()?;
        let destination_id = self.destination_id()?;
        let mode_id = self.mode_id()?;

        if origin_id == destination_id {
            return None;
        }

        Some(ResolvedTrip {
            origin: cache.lookup_location(origin_id)?,
            destination: cache.lookup_location(destination_id)?,
            mode: cache.lookup_mode(mode_id)?,
        })
    }

    /// Whether the draft can be submitted
    ///
    /// True iff origin, destination and mode are set, origin and destination
    /// differ, and all three resolve in a loaded cache.
    pub fn is_ready_to_submit(&self, cache: &ReferenceDataCache) -> bool {
        self.resolve(cache).is_some()
    }

    /// Live quote; `None` unless the draft is ready
    pub fn current_price(&self, cache: &ReferenceDataCache) -> Option<f64> {
        self.resolve(cache)?.price().ok()
    }
}

fn selection(id: impl Into<String>) -> Option<String> {
    let id = id.into();
    is_non_empty(&id).then_some(id)
}

fn deserialize_selection<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|id| is_non_empty(id)))
}
