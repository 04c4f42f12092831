//! config/mod.rs
//! Configuración de la aplicación (claves de APIs, base de datos, servidor).

pub mod app_config;
