//! Per-kind read-through fetchers and the deadline-bounded aggregation.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

use common::Error;
use kv_cache::CacheStore;
use openweather_client::{AirQuality, CurrentWeather, Forecast, GeoLocation, WeatherApi};

use crate::keys::{cache_key, DataKind};

/// Everything known about one city, assembled only when all four
/// sub-fetches succeed within the deadline. No partial variant exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub geo: GeoLocation,
    pub weather: CurrentWeather,
    pub forecast: Forecast,
    pub aqi: AirQuality,
}

/// Aggregation service: one read-through fetcher per data kind plus the
/// concurrent composition over all of them.
#[derive(Clone)]
pub struct WeatherService {
    client: Arc<dyn WeatherApi>,
    cache: Arc<dyn CacheStore>,
    cache_ttl: Duration,
    aggregate_timeout: Duration,
}

impl WeatherService {
    pub fn new(
        client: Arc<dyn WeatherApi>,
        cache: Arc<dyn CacheStore>,
        cache_ttl: Duration,
        aggregate_timeout: Duration,
    ) -> Self {
        Self {
            client,
            cache,
            cache_ttl,
            aggregate_timeout,
        }
    }

    /// Cache-aside read shared by every data kind: serve a decodable
    /// cached value, otherwise go upstream and backfill best-effort.
    async fn read_through<T, Fut>(
        &self,
        city: &str,
        kind: DataKind,
        fetch: impl FnOnce() -> Fut,
    ) -> Result<T, Error>
    where
        T: Serialize + DeserializeOwned,
        Fut: Future<Output = Result<T, Error>>,
    {
        let key = cache_key(city, kind);

        match self.cache.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    debug!("cache hit for {}", key);
                    return Ok(value);
                }
                // Written by an older schema; refetch rather than fail.
                Err(e) => warn!("discarding undecodable cache entry {}: {}", key, e),
            },
            Ok(None) => debug!("cache miss for {}", key),
            Err(e) => warn!("cache read for {} failed, going upstream: {}", key, e),
        }

        let value = fetch().await?;

        // Failures above propagate uncached; nothing on the write path may
        // cost the caller the value it already holds.
        match serde_json::to_string(&value) {
            Ok(raw) => {
                if let Err(e) = self.cache.set(&key, &raw, self.cache_ttl).await {
                    warn!("cache write for {} failed: {}", key, e);
                }
            }
            Err(e) => warn!("failed to serialize {} for caching: {}", key, e),
        }

        Ok(value)
    }

    pub async fn geo(&self, city: &str) -> Result<GeoLocation, Error> {
        self.read_through(city, DataKind::Geo, || self.client.get_geo(city))
            .await
    }

    pub async fn weather(&self, city: &str) -> Result<CurrentWeather, Error> {
        self.read_through(city, DataKind::Weather, || self.client.get_weather(city))
            .await
    }

    pub async fn forecast(&self, city: &str) -> Result<Forecast, Error> {
        self.read_through(city, DataKind::Forecast, || self.client.get_forecast(city))
            .await
    }

    /// Air quality for a city. The provider keys this by coordinates, so
    /// geo resolves first; the result is still cached per city.
    pub async fn air_quality(&self, city: &str) -> Result<AirQuality, Error> {
        let geo = self.geo(city).await?;
        self.air_quality_at(city, geo.lat, geo.lon).await
    }

    async fn air_quality_at(&self, city: &str, lat: f64, lon: f64) -> Result<AirQuality, Error> {
        self.read_through(city, DataKind::Aqi, || self.client.get_air_quality(lat, lon))
            .await
    }

    /// Fetch all four kinds for a city under one deadline.
    ///
    /// Geo resolves first because the air-quality call needs its
    /// coordinates; weather, forecast and air quality then run as three
    /// independent tasks. The wait resolves on whichever comes first: the
    /// deadline, the first sub-fetch error, or all three succeeding.
    /// Tasks still in flight at the deadline are abandoned rather than
    /// aborted; their late results are discarded with the handle.
    pub async fn complete(&self, city: &str) -> Result<WeatherReport, Error> {
        let geo = self.geo(city).await?;

        let weather = tokio::spawn({
            let service = self.clone();
            let city = city.to_owned();
            async move { service.weather(&city).await }
        });
        let forecast = tokio::spawn({
            let service = self.clone();
            let city = city.to_owned();
            async move { service.forecast(&city).await }
        });
        let aqi = tokio::spawn({
            let service = self.clone();
            let city = city.to_owned();
            let (lat, lon) = (geo.lat, geo.lon);
            async move { service.air_quality_at(&city, lat, lon).await }
        });

        let gathered = async { tokio::try_join!(flatten(weather), flatten(forecast), flatten(aqi)) };

        match timeout(self.aggregate_timeout, gathered).await {
            Ok(Ok((weather, forecast, aqi))) => Ok(WeatherReport {
                geo,
                weather,
                forecast,
                aqi,
            }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(Error::Timeout(self.aggregate_timeout.as_secs())),
        }
    }
}

async fn flatten<T>(handle: JoinHandle<Result<T, Error>>) -> Result<T, Error> {
    match handle.await {
        Ok(result) => result,
        Err(e) => Err(Error::Internal(format!("fetch task failed: {e}"))),
    }
}
