//! services/scoring.rs

/// Puntaje de riesgo: perecibilidad * minutos de viaje.
/// Sin validación de rangos; perecibilidad <= 0 da un puntaje <= 0.
pub fn final_score(perishability: i64, travel_time_seconds: i64) -> f64 {
    perishability as f64 * (travel_time_seconds as f64 / 60.0)
}
