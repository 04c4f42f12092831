//! services/travel_time_service.rs
//! Cliente de la API de rutas (TomTom). Nunca falla: cualquier error se
//! convierte en `TravelTime::Fallback` (30 minutos).

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::config::app_config::AppConfig;

/// Duración usada cuando el upstream no responde algo útil.
pub const FALLBACK_TRAVEL_TIME_SECS: i64 = 1800;

#[derive(Debug, Clone, PartialEq)]
pub enum TravelTime {
    Live(i64),
    Fallback { reason: String },
}

impl TravelTime {
    pub fn seconds(&self) -> i64 {
        match self {
            TravelTime::Live(secs) => *secs,
            TravelTime::Fallback { .. } => FALLBACK_TRAVEL_TIME_SECS,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TravelTime::Fallback { .. })
    }
}

// --------------------------------------------------------------------------------
// Formas de respuesta observadas: `routes` como arreglo o como objeto
// --------------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
struct RoutingResponse {
    routes: RoutesField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RoutesField {
    Many(Vec<RouteEntry>),
    Single(RouteEntry),
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    summary: RouteSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteSummary {
    travel_time_in_seconds: i64,
}

impl RoutingResponse {
    fn travel_time_secs(&self) -> Result<i64> {
        let summary = match &self.routes {
            RoutesField::Many(routes) => {
                &routes
                    .first()
                    .ok_or_else(|| anyhow!("La respuesta no trae rutas"))?
                    .summary
            }
            RoutesField::Single(route) => &route.summary,
        };

        if summary.travel_time_in_seconds < 0 {
            return Err(anyhow!(
                "travelTimeInSeconds negativo: {}",
                summary.travel_time_in_seconds
            ));
        }
        Ok(summary.travel_time_in_seconds)
    }
}

#[derive(Clone, Debug)]
pub struct TravelTimeService {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TravelTimeService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .context("No se pudo construir el cliente HTTP de TomTom")?;

        Ok(Self {
            http_client,
            base_url: config.tomtom_base_url.clone(),
            api_key: config.tomtom_api_key.clone(),
        })
    }

    /// Tiempo de viaje entre dos coordenadas "lat,lng" (sin validar).
    pub async fn get_travel_time(&self, origin: &str, destination: &str) -> TravelTime {
        match self.fetch_travel_time(origin, destination).await {
            Ok(secs) => {
                log::info!(
                    "(get_travel_time) {} -> {}: {}s",
                    origin,
                    destination,
                    secs
                );
                TravelTime::Live(secs)
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                log::warn!(
                    "(get_travel_time) Travel time API error, usando {}s: {}",
                    FALLBACK_TRAVEL_TIME_SECS,
                    reason
                );
                TravelTime::Fallback { reason }
            }
        }
    }

    async fn fetch_travel_time(&self, origin: &str, destination: &str) -> Result<i64> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("TOMTOM_API_KEY no configurada"))?;

        // "lat,lng:lat,lng" tal cual; path_segments_mut solo escapa '/', '?', '#', etc.
        let route = format!("{}:{}", origin, destination);
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("TOMTOM_BASE_URL inválida: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("TOMTOM_BASE_URL no admite path: {}", self.base_url))?
            .pop_if_empty()
            .extend(["routing", "1", "calculateRoute", route.as_str(), "json"]);

        let resp = self
            .http_client
            .get(url)
            .query(&[("key", api_key), ("traffic", "true")])
            .send()
            .await
            .context("Fallo al hacer GET calculateRoute")?;

        let status = resp.status();
        if !status.is_success() {
            let body_txt = resp.text().await.unwrap_or_default();
            return Err(anyhow!("TomTom respondió {}: {}", status, body_txt));
        }

        let parsed = resp
            .json::<RoutingResponse>()
            .await
            .context("Respuesta de TomTom con formato inesperado")?;

        parsed.travel_time_secs()
    }
}
