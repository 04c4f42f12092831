//! models/delivery_model.rs
//! Registro persistido en `deliveries` y la respuesta de /history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fila de la tabla `deliveries`. Se crea una vez y nunca se modifica.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryRecord {
    pub id: i64,
    pub city: String,
    pub perishability: i64,
    pub travel_time_sec: i64,
    pub weather: String,
    pub final_score: f64,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar; `id` y `created_at` los asigna el store.
#[derive(Debug, Clone)]
pub struct NewDelivery {
    pub city: String,
    pub perishability: i64,
    pub travel_time_sec: i64,
    pub weather: String,
    pub final_score: f64,
}

/// GET /history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<DeliveryRecord>,
}
