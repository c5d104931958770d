//! Trip pricing
//!
//! A trip costs the distance between the two locations' orbits times the
//! transport mode's rate. Callers resolve ids to records first; the engine
//! never performs lookups.

use api_client::{Location, TransportMode};
use thiserror::Error;

/// Pricing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A record was missing or carried an unusable number
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for pricing operations
pub type Result<T> = std::result::Result<T, PricingError>;

/// Computes trip prices
pub struct PricingEngine;

impl PricingEngine {
    /// Price of travelling from `origin` to `destination` with `mode`
    ///
    /// `|origin.distance_from_sun - destination.distance_from_sun| * mode.price_per_km`,
    /// so the direction of travel does not matter. No rounding is applied.
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidInput` if any record is absent, or a distance or
    /// rate is negative or not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use api_client::{Location, TransportMode};
    /// use app_core::pricing::PricingEngine;
    ///
    /// let earth = Location::new("E", "Earth", 150.0);
    /// let mars = Location::new("M", "Mars", 228.0);
    /// let shuttle = TransportMode::new("S1", "SpaceX", 2.0);
    ///
    /// let price =
    ///     PricingEngine::compute_price(Some(&earth), Some(&mars), Some(&shuttle)).unwrap();
    /// assert_eq!(price, 156.0);
    /// ```
    pub fn compute_price(
        origin: Option<&Location>,
        destination: Option<&Location>,
        mode: Option<&TransportMode>,
    ) -> Result<f64> {
        let origin = origin.ok_or_else(|| missing("origin"))?;
        let destination = destination.ok_or_else(|| missing("destination"))?;
        let mode = mode.ok_or_else(|| missing("transport mode"))?;

        check_quantity("origin distance from sun", origin.distance_from_sun)?;
        check_quantity("destination distance from sun", destination.distance_from_sun)?;
        check_quantity("price per km", mode.price_per_km)?;

        let distance = (origin.distance_from_sun - destination.distance_from_sun).abs();
        Ok(distance * mode.price_per_km)
    }

    /// Render a price with two decimals for display
    pub fn format_price(price: f64) -> String {
        format!("{:.2}", price)
    }
}

fn missing(what: &str) -> PricingError {
    PricingError::InvalidInput(format!("missing {}", what))
}

fn check_quantity(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            what, value
        )))
    }
}
