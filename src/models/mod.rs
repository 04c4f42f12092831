//! models/mod.rs
//! Módulo raíz para modelos/estructuras compartidas.

pub mod delivery_model;
pub mod optimize_model;
pub mod weather_model;
