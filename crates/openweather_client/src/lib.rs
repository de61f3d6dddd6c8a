//! OpenWeatherMap API client.
//!
//! One typed operation per data kind: geocoding, current weather, forecast
//! and air pollution. The [`WeatherApi`] trait is the seam callers program
//! against; tests substitute their own implementation.

pub mod types;

pub use types::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use common::{Error, ServiceConfig};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Upstream weather provider operations.
///
/// Every call issues exactly one network request; retry policy, if any,
/// belongs to the caller.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Resolve a city name to coordinates. Fails with
    /// [`Error::CityNotFound`] when the provider has no match.
    async fn get_geo(&self, city: &str) -> Result<GeoLocation, Error>;

    async fn get_weather(&self, city: &str) -> Result<CurrentWeather, Error>;

    async fn get_forecast(&self, city: &str) -> Result<Forecast, Error>;

    /// Air pollution data is keyed by coordinates, not place names;
    /// callers resolve geo first.
    async fn get_air_quality(&self, lat: f64, lon: f64) -> Result<AirQuality, Error>;
}

/// HTTP client for the OpenWeatherMap API with connection pooling.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    weather_base_url: String,
    geo_base_url: String,
}

impl OpenWeatherClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            weather_base_url: config.weather_api_base_url.trim_end_matches('/').to_owned(),
            geo_base_url: config.geo_api_base_url.trim_end_matches('/').to_owned(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, Error> {
        debug!("Fetching {}: {}", what, url);

        let resp = self
            .client
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| Error::Http(format!("{what} request: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                body: body[..body.len().min(500)].to_string(),
            });
        }

        resp.json()
            .await
            .map_err(|e| Error::Decode(format!("{what} response: {e}")))
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn get_geo(&self, city: &str) -> Result<GeoLocation, Error> {
        let url = format!("{}/direct", self.geo_base_url);
        let results: Vec<GeoLocation> = self
            .get_json(url, &[("q", city), ("limit", "1")], "geocoding")
            .await?;

        results
            .into_iter()
            .next()
            .ok_or_else(|| Error::CityNotFound(city.to_owned()))
    }

    async fn get_weather(&self, city: &str) -> Result<CurrentWeather, Error> {
        let url = format!("{}/weather", self.weather_base_url);
        self.get_json(url, &[("q", city), ("units", "metric")], "current weather")
            .await
    }

    async fn get_forecast(&self, city: &str) -> Result<Forecast, Error> {
        let url = format!("{}/forecast", self.weather_base_url);
        self.get_json(url, &[("q", city), ("units", "metric")], "forecast")
            .await
    }

    async fn get_air_quality(&self, lat: f64, lon: f64) -> Result<AirQuality, Error> {
        let url = format!("{}/air_pollution", self.weather_base_url);
        let (lat, lon) = (lat.to_string(), lon.to_string());
        self.get_json(url, &[("lat", lat.as_str()), ("lon", lon.as_str())], "air quality")
            .await
    }
}
