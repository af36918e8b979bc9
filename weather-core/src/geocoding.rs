use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::error::WeatherError;
use crate::provider::truncate_body;

const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com";
const ENDPOINT: &str = "opencagedata";

/// A latitude/longitude pair, produced transiently for a forecast lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolves a city name to a [`Coordinate`] via an upstream geocoding API.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, city: &str) -> Result<Coordinate, WeatherError>;
}

/// Forward geocoding against opencagedata.com.
///
/// Takes the first entry of the result list; an empty list is reported as
/// [`WeatherError::NoGeocodingMatch`], distinct from transport failures.
#[derive(Debug, Clone)]
pub struct OpenCageGeocoder {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenCageGeocoder {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the geocoder at a different host, used to test against a local stub.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OcGeometry {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct OcResult {
    geometry: OcGeometry,
}

#[derive(Debug, Deserialize)]
struct OcResponse {
    results: Vec<OcResult>,
}

#[async_trait]
impl Geocoder for OpenCageGeocoder {
    async fn resolve(&self, city: &str) -> Result<Coordinate, WeatherError> {
        let url = format!("{}/geocode/v1/json", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("q", city)])
            .send()
            .await
            .map_err(|source| WeatherError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Transport {
                endpoint: ENDPOINT,
                source,
            })?;

        if !status.is_success() {
            return Err(WeatherError::UpstreamStatus {
                endpoint: ENDPOINT,
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OcResponse = serde_json::from_str(&body).map_err(|source| {
            WeatherError::Decode {
                endpoint: ENDPOINT,
                source,
            }
        })?;

        let first = parsed
            .results
            .first()
            .ok_or_else(|| WeatherError::NoGeocodingMatch {
                city: city.to_string(),
            })?;

        let coordinate = Coordinate {
            latitude: first.geometry.lat,
            longitude: first.geometry.lng,
        };
        info!(
            "opencagedata: {city}: lat={:.6}, long={:.6}",
            coordinate.latitude, coordinate.longitude
        );
        Ok(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn takes_the_first_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .and(query_param("key", "KEY"))
            .and(query_param("q", "Portland"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    { "geometry": { "lat": 45.512230, "lng": -122.658722 } },
                    { "geometry": { "lat": 43.659, "lng": -70.268 } }
                ]
            })))
            .mount(&server)
            .await;

        let geocoder = OpenCageGeocoder::with_base_url("KEY".into(), server.uri());
        let coordinate = geocoder.resolve("Portland").await.unwrap();

        assert!((coordinate.latitude - 45.512230).abs() < 1e-9);
        assert!((coordinate.longitude - (-122.658722)).abs() < 1e-9);
    }

    #[tokio::test]
    async fn empty_result_list_is_a_no_match_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": [] })),
            )
            .mount(&server)
            .await;

        let geocoder = OpenCageGeocoder::with_base_url("KEY".into(), server.uri());
        let err = geocoder.resolve("Nowhereville").await.unwrap_err();

        assert!(matches!(
            err,
            WeatherError::NoGeocodingMatch { ref city } if city == "Nowhereville"
        ));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .respond_with(ResponseTemplate::new(402).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let geocoder = OpenCageGeocoder::with_base_url("KEY".into(), server.uri());
        let err = geocoder.resolve("Portland").await.unwrap_err();

        assert!(matches!(err, WeatherError::UpstreamStatus { .. }));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn missing_geometry_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [ { "confidence": 9 } ]
            })))
            .mount(&server)
            .await;

        let geocoder = OpenCageGeocoder::with_base_url("KEY".into(), server.uri());
        let err = geocoder.resolve("Portland").await.unwrap_err();

        assert!(matches!(err, WeatherError::Decode { .. }));
    }
}
