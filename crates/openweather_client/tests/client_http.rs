//! HTTP-level tests for `OpenWeatherClient` against a mock server.

use common::{Error, ServiceConfig};
use openweather_client::{OpenWeatherClient, WeatherApi};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ServiceConfig {
    ServiceConfig {
        api_key: "test-key".into(),
        weather_api_base_url: server.uri(),
        geo_api_base_url: server.uri(),
        ..ServiceConfig::default()
    }
}

#[tokio::test]
async fn test_get_weather_decodes_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "London",
            "main": {"temp": 15.2, "pressure": 1012, "humidity": 72},
            "weather": [{"description": "light rain", "icon": "10d"}]
        })))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&config_for(&server)).expect("client should build");
    let weather = client.get_weather("London").await.expect("request should succeed");

    assert_eq!(weather.name, "London");
    assert!((weather.main.temp - 15.2).abs() < f64::EPSILON);
    assert_eq!(weather.main.humidity, 72);
    assert_eq!(weather.weather[0].description, "light rain");
}

#[tokio::test]
async fn test_get_geo_takes_first_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/direct"))
        .and(query_param("q", "London"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "London", "lat": 51.51, "lon": -0.13, "country": "GB"}
        ])))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&config_for(&server)).expect("client should build");
    let geo = client.get_geo("London").await.expect("request should succeed");

    assert_eq!(geo.name, "London");
    assert!((geo.lat - 51.51).abs() < f64::EPSILON);
    assert!((geo.lon - -0.13).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_get_geo_empty_result_is_city_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/direct"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&config_for(&server)).expect("client should build");
    let err = client.get_geo("Atlantis").await.expect_err("should not resolve");

    assert!(matches!(err, Error::CityNotFound(city) if city == "Atlantis"));
}

#[tokio::test]
async fn test_non_success_status_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"cod": 401, "message": "Invalid API key"})),
        )
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&config_for(&server)).expect("client should build");
    let err = client.get_weather("London").await.expect_err("should fail");

    match err {
        Error::UpstreamStatus { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("expected UpstreamStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&config_for(&server)).expect("client should build");
    let err = client.get_forecast("London").await.expect_err("should fail");

    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn test_get_air_quality_queries_by_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/air_pollution"))
        .and(query_param("lat", "51.51"))
        .and(query_param("lon", "-0.13"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [{
                "dt": 1722945600,
                "main": {"aqi": 2},
                "components": {
                    "co": 201.9, "no": 0.02, "no2": 1.1, "o3": 68.7,
                    "so2": 0.64, "pm2_5": 0.5, "pm10": 0.54, "nh3": 0.12
                }
            }]
        })))
        .mount(&server)
        .await;

    let client = OpenWeatherClient::new(&config_for(&server)).expect("client should build");
    let aqi = client.get_air_quality(51.51, -0.13).await.expect("request should succeed");

    assert_eq!(aqi.list.len(), 1);
    assert_eq!(aqi.list[0].main.aqi, 2);
}
