//! services/weather_service.rs
//! Cliente de OpenWeather. Por coordenadas (preferido) o por nombre de ciudad.
//! Ningún error se propaga: se devuelve el centinela "unknown".

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::config::app_config::AppConfig;
use crate::models::weather_model::{WeatherLookup, WeatherReport, UNKNOWN};

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    #[serde(default)]
    weather: Vec<WeatherCondition>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    main: Option<MainBlock>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    #[serde(default)]
    temp: Option<f64>,
}

impl OpenWeatherResponse {
    fn into_report(self) -> Result<WeatherReport> {
        let description = self
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or_else(|| anyhow!("Lista de condiciones vacía"))?;

        let location_label = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN.to_string());

        Ok(WeatherReport {
            description,
            location_label,
            temperature: self.main.and_then(|m| m.temp),
        })
    }
}

#[derive(Clone, Debug)]
pub struct WeatherService {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .context("No se pudo construir el cliente HTTP de OpenWeather")?;

        Ok(Self {
            http_client,
            base_url: config.openweather_base_url.clone(),
            api_key: config.openweather_api_key.clone(),
        })
    }

    pub async fn get_weather_by_coordinates(&self, lat: f64, lng: f64) -> WeatherLookup {
        let params = [("lat", lat.to_string()), ("lon", lng.to_string())];
        match self.fetch(&params).await {
            Ok(report) => {
                log::info!(
                    "(get_weather_by_coordinates) {},{} -> '{}' en {}",
                    lat,
                    lng,
                    report.description,
                    report.location_label
                );
                WeatherLookup::Resolved(report)
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                log::warn!("(get_weather_by_coordinates) Weather API error: {}", reason);
                WeatherLookup::Unavailable { reason }
            }
        }
    }

    /// Variante legacy: solo la descripción, o "unknown".
    pub async fn get_weather_by_city_name(&self, city: &str) -> String {
        let params = [("q", city.to_string())];
        match self.fetch(&params).await {
            Ok(report) => report.description,
            Err(e) => {
                log::warn!(
                    "(get_weather_by_city_name) Weather API error para '{}': {:#}",
                    city,
                    e
                );
                UNKNOWN.to_string()
            }
        }
    }

    async fn fetch(&self, params: &[(&str, String)]) -> Result<WeatherReport> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("OPENWEATHER_API_KEY no configurada"))?;

        let url = format!("{}/data/2.5/weather", self.base_url);
        let resp = self
            .http_client
            .get(&url)
            .query(params)
            .query(&[("appid", api_key), ("units", "metric")])
            .send()
            .await
            .context("Fallo al hacer GET weather")?;

        let status = resp.status();
        if !status.is_success() {
            let body_txt = resp.text().await.unwrap_or_default();
            return Err(anyhow!("OpenWeather respondió {}: {}", status, body_txt));
        }

        resp.json::<OpenWeatherResponse>()
            .await
            .context("Respuesta de OpenWeather con formato inesperado")?
            .into_report()
    }
}
