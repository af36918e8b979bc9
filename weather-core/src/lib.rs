//! Core library for the weather aggregation service.
//!
//! This crate defines:
//! - Abstraction over weather providers and geocoding
//! - Concurrent fan-out aggregation across all providers
//! - Shared domain models and the error taxonomy
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod aggregator;
pub mod error;
pub mod geocoding;
pub mod model;
pub mod provider;
pub mod units;

pub use aggregator::MultiProvider;
pub use error::WeatherError;
pub use geocoding::{Coordinate, Geocoder, OpenCageGeocoder};
pub use model::AggregateResult;
pub use provider::WeatherProvider;
pub use units::Kelvin;
