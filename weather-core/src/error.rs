use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while answering a temperature request.
///
/// Errors propagate unchanged from the adapter that produced them up through
/// the aggregator to the HTTP layer, which renders the `Display` text as the
/// response body. Nothing is retried, swallowed or rewrapped along the way.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request to an upstream never completed (connection, DNS, body read).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-2xx status.
    #[error("{endpoint} returned status {status}: {body}")]
    UpstreamStatus {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The upstream answered 2xx but the body did not match the expected schema.
    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Geocoding succeeded as an HTTP call but matched no location.
    #[error("geocoding found no results for \"{city}\"")]
    NoGeocodingMatch { city: String },

    /// Aggregation was attempted over an empty provider list.
    #[error("no weather providers configured")]
    NoProviders,
}
