//! Reference data cache
//!
//! Holds the last-fetched locations and transport modes for one booking flow,
//! with a load status per collection. Lookups only succeed once a collection
//! is loaded; a failed refresh keeps the previous records visible so the host
//! can keep rendering them.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use api_client::{Location, LocationService, TransportMode, TransportModeService};
use thiserror::Error;

/// Reference data errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The collaborator failed to list the collection
    #[error("Failed to fetch {collection}: {reason}")]
    FetchFailed {
        /// Collection name ("locations" or "transport modes")
        collection: &'static str,
        /// Reported failure
        reason: String,
    },
}

/// Result type for reference data operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Load status of one collection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Never fetched
    #[default]
    NotLoaded,

    /// Fetch in flight
    Loading,

    /// Last fetch succeeded
    Loaded,

    /// Last fetch failed
    Failed(String),
}

impl LoadStatus {
    /// Whether lookups are valid
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Failure reason of the last fetch, if it failed
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLoaded => write!(f, "not loaded"),
            Self::Loading => write!(f, "loading"),
            Self::Loaded => write!(f, "loaded"),
            Self::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Records identified by a string key
pub trait Keyed {
    /// The record's unique key
    fn key(&self) -> &str;
}

impl Keyed for Location {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for TransportMode {
    fn key(&self) -> &str {
        &self.id
    }
}

/// A keyed collection of records in fetch order
#[derive(Debug, Clone)]
pub struct Collection<T> {
    name: &'static str,
    items: Vec<T>,
    index: HashMap<String, usize>,
    status: LoadStatus,
}

impl<T: Keyed> Collection<T> {
    /// Create an empty, not-loaded collection
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            items: Vec::new(),
            index: HashMap::new(),
            status: LoadStatus::NotLoaded,
        }
    }

    /// Collection name, used in logs and errors
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current load status
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Held records in fetch order
    ///
    /// After a failed refresh these are the records of the last successful
    /// fetch.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of held records
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no records are held
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a record; `None` unless loaded and present
    pub fn get(&self, key: &str) -> Option<&T> {
        if !self.status.is_loaded() {
            return None;
        }
        self.index.get(key).and_then(|&i| self.items.get(i))
    }

    /// Replace the held records and mark the collection loaded
    pub fn set_loaded(&mut self, items: Vec<T>) -> usize {
        let count = self.replace(items);
        self.status = LoadStatus::Loaded;
        count
    }

    /// Run a fetch and apply its result
    ///
    /// The status is `Loading` while `fetch` is pending. If the returned
    /// future is dropped before `fetch` resolves, the previous status is put
    /// back and the records are left untouched.
    pub async fn load<F>(&mut self, fetch: F) -> Result<usize>
    where
        F: Future<Output = api_client::Result<Vec<T>>>,
    {
        let previous = std::mem::replace(&mut self.status, LoadStatus::Loading);
        tracing::debug!("Fetching {}", self.name);

        let guard = LoadGuard {
            collection: self,
            previous: Some(previous),
        };
        let result = fetch.await;
        guard.complete(result)
    }

    fn replace(&mut self, items: Vec<T>) -> usize {
        self.items.clear();
        self.index.clear();

        for item in items {
            if self.index.contains_key(item.key()) {
                tracing::warn!("Dropping duplicate {} record {}", self.name, item.key());
                continue;
            }
            self.index.insert(item.key().to_string(), self.items.len());
            self.items.push(item);
        }

        self.items.len()
    }
}

/// Restores the previous status when a load is abandoned mid-flight
struct LoadGuard<'a, T> {
    collection: &'a mut Collection<T>,
    previous: Option<LoadStatus>,
}

impl<T: Keyed> LoadGuard<'_, T> {
    fn complete(mut self, result: api_client::Result<Vec<T>>) -> Result<usize> {
        self.previous = None;
        let collection = &mut *self.collection;

        match result {
            Ok(items) => {
                let count = collection.set_loaded(items);
                tracing::info!("Loaded {} {}", count, collection.name);
                Ok(count)
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!("Failed to fetch {}: {}", collection.name, reason);
                collection.status = LoadStatus::Failed(reason.clone());
                Err(CacheError::FetchFailed {
                    collection: collection.name,
                    reason,
                })
            }
        }
    }
}

impl<T> Drop for LoadGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.collection.status = previous;
        }
    }
}

/// Locations and transport modes for one booking flow
#[derive(Debug, Clone)]
pub struct ReferenceDataCache {
    locations: Collection<Location>,
    modes: Collection<TransportMode>,
}

impl Default for ReferenceDataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceDataCache {
    /// Create an empty cache; both collections start not loaded
    pub fn new() -> Self {
        Self {
            locations: Collection::new("locations"),
            modes: Collection::new("transport modes"),
        }
    }

    /// Create a cache with both collections already loaded
    pub fn from_records(locations: Vec<Location>, modes: Vec<TransportMode>) -> Self {
        let mut cache = Self::new();
        cache.locations.set_loaded(locations);
        cache.modes.set_loaded(modes);
        cache
    }

    /// Fetch locations, returning how many were loaded
    pub async fn fetch_locations(&mut self, service: &dyn LocationService) -> Result<usize> {
        self.locations.load(service.list_locations()).await
    }

    /// Fetch transport modes, returning how many were loaded
    pub async fn fetch_modes(&mut self, service: &dyn TransportModeService) -> Result<usize> {
        self.modes.load(service.list_modes()).await
    }

    /// Fetch both collections concurrently
    pub async fn fetch_all(
        &mut self,
        locations: &dyn LocationService,
        modes: &dyn TransportModeService,
    ) -> (Result<usize>, Result<usize>) {
        let Self {
            locations: location_collection,
            modes: mode_collection,
        } = self;

        tokio::join!(
            location_collection.load(locations.list_locations()),
            mode_collection.load(modes.list_modes()),
        )
    }

    /// Look up a location; `None` unless locations are loaded and `id` is known
    pub fn lookup_location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Look up a transport mode; `None` unless modes are loaded and `id` is known
    pub fn lookup_mode(&self, id: &str) -> Option<&TransportMode> {
        self.modes.get(id)
    }

    /// Every held location except `excluding`, in fetch order
    pub fn available_destinations(&self, excluding: Option<&str>) -> Vec<&Location> {
        self.locations
            .items()
            .iter()
            .filter(|location| Some(location.id.as_str()) != excluding)
            .collect()
    }

    /// Held locations in fetch order
    pub fn locations(&self) -> &[Location] {
        self.locations.items()
    }

    /// Held transport modes in fetch order
    pub fn modes(&self) -> &[TransportMode] {
        self.modes.items()
    }

    /// Load status of the locations
    pub fn location_status(&self) -> &LoadStatus {
        self.locations.status()
    }

    /// Load status of the transport modes
    pub fn mode_status(&self) -> &LoadStatus {
        self.modes.status()
    }

    /// Whether both collections are loaded
    pub fn is_ready(&self) -> bool {
        self.locations.status().is_loaded() && self.modes.status().is_loaded()
    }
}
