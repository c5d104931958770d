//! Cosmic Voyage catalogue tool
//!
//! Loads the reference data from the booking service configured through
//! `VOYAGE_API_URL` / `VOYAGE_API_TIMEOUT_SECS` and logs the locations and
//! transport modes, with a sample quote between the first two locations.

use anyhow::Context;
use api_client::{ApiClientConfig, RestClient};
use app_core::{BookingDraft, PricingEngine};
use app_state::ReferenceDataCache;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).try_init() {
        eprintln!("Failed to initialise tracing: {}", e);
    }

    let config = ApiClientConfig::from_env().context("reading client configuration")?;
    tracing::info!("Using booking service at {}", config.base_url);
    let client = RestClient::new(config).context("building REST client")?;

    let mut cache = ReferenceDataCache::new();
    let (locations, modes) = cache.fetch_all(&client, &client).await;
    let location_count = locations.context("loading locations")?;
    let mode_count = modes.context("loading transport modes")?;
    tracing::info!(
        "Loaded {} locations and {} transport modes",
        location_count,
        mode_count
    );

    for location in cache.locations() {
        tracing::info!(
            "Location {} ({}): {} from the sun",
            location.name,
            location.id,
            location.distance_from_sun
        );
    }
    for mode in cache.modes() {
        tracing::info!(
            "Transport mode {} ({}): {} per km",
            mode.name,
            mode.id,
            mode.price_per_km
        );
    }

    if let ([origin, destination, ..], [mode, ..]) = (cache.locations(), cache.modes()) {
        let mut draft = BookingDraft::new();
        draft.set_origin(origin.id.clone());
        draft.set_destination(destination.id.clone());
        draft.set_mode(mode.id.clone());

        if let Some(price) = draft.current_price(&cache) {
            tracing::info!(
                "Sample quote {} -> {} by {}: {}",
                origin.name,
                destination.name,
                mode.name,
                PricingEngine::format_price(price)
            );
        }
    }

    Ok(())
}
