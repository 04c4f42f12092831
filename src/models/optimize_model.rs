//! models/optimize_model.rs

use serde::{Deserialize, Serialize};

/// Rango aceptado de perecibilidad (igual al formulario del frontend).
pub const MIN_PERISHABILITY: i64 = 1;
pub const MAX_PERISHABILITY: i64 = 10;

/// POST /optimize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub perishability: i64,
    pub start: String, // "lat,lng"
    pub end: String,   // "lat,lng"
    // Solo se usa como etiqueta si el clima no resuelve un lugar
    #[serde(default)]
    pub city: Option<String>,
}

impl OptimizeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_PERISHABILITY..=MAX_PERISHABILITY).contains(&self.perishability) {
            return Err(format!(
                "perishability debe estar entre {} y {}, se recibió {}",
                MIN_PERISHABILITY, MAX_PERISHABILITY, self.perishability
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteCoordinates {
    pub start: String,
    pub end: String,
}

/// Respuesta de /optimize. Los errores viajan en `error`, siempre con status 200.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub city: String,
    pub travel_time_sec: Option<i64>,
    pub weather: String,
    pub temperature: Option<f64>,
    pub final_score: Option<f64>,
    pub coordinates: RouteCoordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Coordenada ya validada.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Parsea "lat,lng". Devuelve None si no son dos números o están fuera de rango.
pub fn parse_coordinate(raw: &str) -> Option<Coordinate> {
    let (lat_str, lng_str) = raw.split_once(',')?;
    let lat: f64 = lat_str.trim().parse().ok()?;
    let lng: f64 = lng_str.trim().parse().ok()?;

    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return None;
    }
    Some(Coordinate { lat, lng })
}
