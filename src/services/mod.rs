//! services/mod.rs
//! Módulo que agrupa los servicios: clientes de upstream, puntaje,
//! persistencia y el orquestador de /optimize.

pub mod delivery_service;
pub mod optimize_service;
pub mod scoring;
pub mod travel_time_service;
pub mod weather_service;
