use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use super::{WeatherProvider, truncate_body};
use crate::{error::WeatherError, units::Kelvin};

const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org";
const ENDPOINT: &str = "openweathermap";

/// Current-weather lookup against openweathermap.org.
///
/// The upstream reports Kelvin when no `units` parameter is sent, so the
/// reading passes through without conversion.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the adapter at a different host, used to test against a local stub.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http: Client::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwResponse {
    main: OwMain,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    fn name(&self) -> &'static str {
        ENDPOINT
    }

    async fn temperature(&self, city: &str) -> Result<Kelvin, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("APPID", self.api_key.as_str()), ("q", city)])
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

        let parsed: OwResponse = serde_json::from_str(&body).map_err(|source| {
            WeatherError::Decode {
                endpoint: ENDPOINT,
                source,
            }
        })?;

        let kelvin = Kelvin(parsed.main.temp);
        info!("{}: {city}: {kelvin}", self.name());
        Ok(kelvin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn reads_kelvin_from_main_temp() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("APPID", "KEY"))
            .and(query_param("q", "Kyiv"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": { "temp": 281.15, "humidity": 70 },
                "name": "Kyiv"
            })))
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), server.uri());
        let temp = provider.temperature("Kyiv").await.unwrap();

        assert_eq!(provider.name(), "openweathermap");
        assert!((temp.0 - 281.15).abs() < 1e-9);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), server.uri());
        let err = provider.temperature("Kyiv").await.unwrap_err();

        assert!(matches!(err, WeatherError::UpstreamStatus { .. }));
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), server.uri());
        let err = provider.temperature("Kyiv").await.unwrap_err();

        assert!(matches!(err, WeatherError::Decode { .. }));
    }
}
