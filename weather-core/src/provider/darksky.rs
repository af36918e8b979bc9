use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use super::{WeatherProvider, truncate_body};
use crate::{
    error::WeatherError,
    geocoding::{Coordinate, Geocoder},
    units::Kelvin,
};

const DEFAULT_BASE_URL: &str = "https://api.darksky.net";
const ENDPOINT: &str = "darksky";

/// Forecast lookup against darksky.net.
///
/// The upstream is keyed by coordinate, so the city is first resolved through
/// the injected [`Geocoder`]; a failed resolution aborts the lookup before
/// any forecast call is made. The upstream reports Fahrenheit, converted to
/// Kelvin on the way out.
#[derive(Debug, Clone)]
pub struct DarkSkyProvider {
    api_key: String,
    base_url: String,
    http: Client,
    geocoder: Arc<dyn Geocoder>,
}

impl DarkSkyProvider {
    pub fn new(api_key: String, geocoder: Arc<dyn Geocoder>) -> Self {
        Self::with_base_url(api_key, geocoder, DEFAULT_BASE_URL)
    }

    /// Point the adapter at a different host, used to test against a local stub.
    pub fn with_base_url(
        api_key: String,
        geocoder: Arc<dyn Geocoder>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
            geocoder,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DsCurrently {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct DsResponse {
    currently: DsCurrently,
}

#[async_trait]
impl WeatherProvider for DarkSkyProvider {
    fn name(&self) -> &'static str {
        ENDPOINT
    }

    async fn temperature(&self, city: &str) -> Result<Kelvin, WeatherError> {
        let Coordinate {
            latitude,
            longitude,
        } = match self.geocoder.resolve(city).await {
            Ok(coordinate) => coordinate,
            Err(err) => {
                warn!("failed to find latitude and longitude for {city}: {err}");
                return Err(err);
            }
        };

        let url = format!(
            "{}/forecast/{}/{latitude:.6},{longitude:.6}",
            self.base_url, self.api_key
        );

        let res = self
            .http
            .get(&url)
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

        let parsed: DsResponse = serde_json::from_str(&body).map_err(|source| {
            WeatherError::Decode {
                endpoint: ENDPOINT,
                source,
            }
        })?;

        let kelvin = Kelvin::from_fahrenheit(parsed.currently.temperature);
        info!("{}: {city}: {kelvin}", self.name());
        Ok(kelvin)
    }
}
