//! tests/mod.rs
//! Pruebas del servicio. Los upstreams se simulan con wiremock y la base de
//! datos es un SQLite temporal por test.

mod handler_tests;

use std::time::Duration;

use serde_json::json;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::app_config::AppConfig;
use crate::services::delivery_service::DeliveryService;

pub const TEST_KEY: &str = "test-key";
pub const ROUTE_PATH: &str = r"^/routing/1/calculateRoute/.+/json$";
pub const WEATHER_PATH: &str = "/data/2.5/weather";

/// Config apuntando a los mock servers, con claves de prueba.
pub fn test_config(tomtom: &MockServer, weather: &MockServer) -> AppConfig {
    AppConfig {
        tomtom_api_key: Some(TEST_KEY.to_string()),
        openweather_api_key: Some(TEST_KEY.to_string()),
        tomtom_base_url: tomtom.uri(),
        openweather_base_url: weather.uri(),
        upstream_timeout: Duration::from_secs(2),
        ..AppConfig::default()
    }
}

/// SQLite en un directorio temporal. El `TempDir` debe vivir lo que dure el test.
pub async fn temp_delivery_service(migrate: bool) -> (DeliveryService, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("test.db"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(2)
        .connect_with(options)
        .await
        .expect("Failed to open temp sqlite");

    let service = DeliveryService::new(pool);
    if migrate {
        service
            .run_migrations()
            .await
            .expect("Failed to run migrations");
    }
    (service, dir)
}

pub async fn mount_route_ok(server: &MockServer, secs: i64) {
    Mock::given(method("GET"))
        .and(path_regex(ROUTE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "formatVersion": "0.0.12",
            "routes": [{ "summary": { "lengthInMeters": 21000, "travelTimeInSeconds": secs } }]
        })))
        .mount(server)
        .await;
}

pub async fn mount_weather_ok(server: &MockServer, description: &str, name: &str, temp: f64) {
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "weather": [{ "id": 721, "main": "Haze", "description": description }],
            "main": { "temp": temp, "humidity": 70 },
            "name": name
        })))
        .mount(server)
        .await;
}
