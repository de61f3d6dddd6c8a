//! Typed response shapes for the upstream weather provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One geocoding result: coordinates plus the resolved place name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Current conditions for a city, as returned by `/weather`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(default)]
    pub name: String,
    pub main: WeatherMain,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    #[serde(default)]
    pub pressure: i64,
    #[serde(default)]
    pub humidity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherCondition {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// Forecast: a location summary plus an ordered list of time-stamped samples.
///
/// Treated as opaque once cached; nothing beyond valid JSON is enforced on
/// the sample list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub city: ForecastCity,
    #[serde(default)]
    pub list: Vec<ForecastSample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastCity {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSample {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub dt: DateTime<Utc>,
    pub main: WeatherMain,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dt_txt: Option<String>,
}

/// Air pollution samples for one coordinate pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQuality {
    #[serde(default)]
    pub list: Vec<AirQualitySample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualitySample {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub dt: DateTime<Utc>,
    pub main: AirQualityIndex,
    pub components: PollutantConcentrations,
}

/// Overall index: 1 (good) through 5 (very poor).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityIndex {
    pub aqi: i64,
}

/// Pollutant concentrations in µg/m³.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutantConcentrations {
    #[serde(default)]
    pub co: f64,
    #[serde(default)]
    pub no: f64,
    #[serde(default)]
    pub no2: f64,
    #[serde(default)]
    pub o3: f64,
    #[serde(default)]
    pub so2: f64,
    #[serde(default)]
    pub pm2_5: f64,
    #[serde(default)]
    pub pm10: f64,
    #[serde(default)]
    pub nh3: f64,
}
