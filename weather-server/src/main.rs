//! Binary crate for the weather aggregation HTTP service.
//!
//! This crate focuses on:
//! - Parsing startup flags (API keys, listen address)
//! - Wiring providers into the shared aggregator
//! - Serving the HTTP routes

use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use weather_core::{
    MultiProvider, OpenCageGeocoder,
    provider::{WeatherProvider, darksky::DarkSkyProvider, openweather::OpenWeatherProvider},
};

mod app;
mod cli;

// The geocoder key is not part of the startup surface; only the two weather
// provider keys are configurable.
const OPENCAGE_API_KEY: &str = "opencage-api-key";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = cli::Args::parse();

    let geocoder = Arc::new(OpenCageGeocoder::new(OPENCAGE_API_KEY.to_string()));
    let providers: Vec<Arc<dyn WeatherProvider>> = vec![
        Arc::new(OpenWeatherProvider::new(args.openweathermap_api_key)),
        Arc::new(DarkSkyProvider::new(args.darksky_api_key, geocoder)),
    ];

    let state = Arc::new(app::AppState {
        multi: MultiProvider::new(providers),
    });

    let listener = TcpListener::bind(args.listen).await?;
    app::serve(listener, state).await
}
