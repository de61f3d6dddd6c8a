//! HTTP route layer: request parsing, status mapping, JSON envelopes.

use std::sync::Arc;

use aggregator::WeatherService;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use common::Error;

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WeatherService>,
}

#[derive(Debug, Deserialize)]
struct CityQuery {
    #[serde(default)]
    city: String,
}

fn missing_city() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "city parameter is required" })),
    )
        .into_response()
}

fn downstream_error(err: Error) -> Response {
    error!("request failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}

/// GET /health - Liveness probe
async fn health() -> &'static str {
    "ok"
}

/// GET /geo?city= - Resolved coordinates for a city
async fn get_geo(State(state): State<AppState>, Query(query): Query<CityQuery>) -> Response {
    let city = query.city.trim();
    if city.is_empty() {
        return missing_city();
    }
    match state.service.geo(city).await {
        Ok(geo) => (StatusCode::OK, Json(json!({ "geo": geo }))).into_response(),
        Err(e) => downstream_error(e),
    }
}

/// GET /weather?city= - Current conditions
async fn get_weather(State(state): State<AppState>, Query(query): Query<CityQuery>) -> Response {
    let city = query.city.trim();
    if city.is_empty() {
        return missing_city();
    }
    match state.service.weather(city).await {
        Ok(weather) => (StatusCode::OK, Json(json!({ "weather": weather }))).into_response(),
        Err(e) => downstream_error(e),
    }
}

/// GET /forecast?city= - Time-stamped forecast samples
async fn get_forecast(State(state): State<AppState>, Query(query): Query<CityQuery>) -> Response {
    let city = query.city.trim();
    if city.is_empty() {
        return missing_city();
    }
    match state.service.forecast(city).await {
        Ok(forecast) => (StatusCode::OK, Json(json!({ "forecast": forecast }))).into_response(),
        Err(e) => downstream_error(e),
    }
}

/// GET /aqi?city= - Air quality, resolved via the city's coordinates
async fn get_aqi(State(state): State<AppState>, Query(query): Query<CityQuery>) -> Response {
    let city = query.city.trim();
    if city.is_empty() {
        return missing_city();
    }
    match state.service.air_quality(city).await {
        Ok(aqi) => (StatusCode::OK, Json(json!({ "aqi": aqi }))).into_response(),
        Err(e) => downstream_error(e),
    }
}

/// GET /weather-data?city= - The full aggregated report
async fn get_weather_data(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> Response {
    let city = query.city.trim();
    if city.is_empty() {
        return missing_city();
    }
    match state.service.complete(city).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => downstream_error(e),
    }
}

/// Build the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/geo", get(get_geo))
        .route("/weather", get(get_weather))
        .route("/forecast", get(get_forecast))
        .route("/aqi", get(get_aqi))
        .route("/weather-data", get(get_weather_data))
        .with_state(state)
}
