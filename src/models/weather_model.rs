//! models/weather_model.rs
//! Forma canónica del clima y el resultado explícito de la consulta.

use serde::{Deserialize, Serialize};

/// Valor reservado cuando no se pudo determinar un dato.
pub const UNKNOWN: &str = "unknown";

/// Forma canónica del clima, sin importar cómo respondió el upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub description: String,
    pub location_label: String,
    pub temperature: Option<f64>,
}

impl WeatherReport {
    /// Triple centinela: {"unknown", "unknown", null}
    pub fn unknown() -> Self {
        WeatherReport {
            description: UNKNOWN.to_string(),
            location_label: UNKNOWN.to_string(),
            temperature: None,
        }
    }
}

/// Resultado explícito de una consulta de clima.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherLookup {
    Resolved(WeatherReport),
    Unavailable { reason: String },
}

impl WeatherLookup {
    pub fn report(&self) -> WeatherReport {
        match self {
            WeatherLookup::Resolved(report) => report.clone(),
            WeatherLookup::Unavailable { .. } => WeatherReport::unknown(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, WeatherLookup::Resolved(_))
    }
}
