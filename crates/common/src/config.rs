//! Service configuration.

use serde::{Deserialize, Serialize};

/// Runtime configuration, loaded from the environment once at startup and
/// passed explicitly into each component's constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// OpenWeatherMap API key.
    #[serde(default)]
    pub api_key: String,

    /// Base URL for the current weather, forecast and air pollution endpoints.
    #[serde(default = "default_weather_api_base_url")]
    pub weather_api_base_url: String,

    /// Base URL for the geocoding endpoint.
    #[serde(default = "default_geo_api_base_url")]
    pub geo_api_base_url: String,

    #[serde(default = "default_redis_host")]
    pub redis_host: String,

    #[serde(default = "default_redis_port")]
    pub redis_port: u16,

    /// TTL applied to every cache entry, in seconds.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Overall deadline for one aggregation, in seconds.
    #[serde(default = "default_aggregate_timeout_secs")]
    pub aggregate_timeout_secs: u64,

    /// TCP port the HTTP server binds.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_weather_api_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".into()
}

fn default_geo_api_base_url() -> String {
    "https://api.openweathermap.org/geo/1.0".into()
}

fn default_redis_host() -> String {
    "127.0.0.1".into()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_cache_ttl_secs() -> u64 {
    600
}

fn default_aggregate_timeout_secs() -> u64 {
    5
}

fn default_port() -> u16 {
    8061
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            weather_api_base_url: default_weather_api_base_url(),
            geo_api_base_url: default_geo_api_base_url(),
            redis_host: default_redis_host(),
            redis_port: default_redis_port(),
            cache_ttl_secs: default_cache_ttl_secs(),
            aggregate_timeout_secs: default_aggregate_timeout_secs(),
            port: default_port(),
        }
    }
}
