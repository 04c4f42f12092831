//! config/app_config.rs
//! Configuración global del servicio. Se construye una sola vez en `main`
//! (después de cargar el .env) y se pasa por referencia a cada servicio.

use std::time::Duration;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tomtom_api_key: Option<String>,
    pub openweather_api_key: Option<String>,
    pub tomtom_base_url: String,
    pub openweather_base_url: String,
    pub upstream_timeout: Duration,
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            tomtom_api_key: None,
            openweather_api_key: None,
            tomtom_base_url: "https://api.tomtom.com".to_string(),
            openweather_base_url: "https://api.openweathermap.org".to_string(),
            upstream_timeout: Duration::from_secs(10),
            database_url: "sqlite:data/routemonk.db".to_string(),
            db_max_connections: 5,
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
        }
    }
}

impl AppConfig {
    /// Lee la configuración desde las variables de entorno del proceso.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Igual que `from_env`, pero con una función de búsqueda inyectable
    /// (útil en tests para no tocar el entorno real).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        // Variables vacías cuentan como no definidas
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("UPSTREAM_TIMEOUT_SECS inválido: '{}'", raw))?,
            None => defaults.upstream_timeout.as_secs(),
        };

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: '{}'", raw))?,
            None => defaults.db_max_connections,
        };

        let server_port = match get("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("SERVER_PORT inválido: '{}'", raw))?,
            None => defaults.server_port,
        };

        Ok(AppConfig {
            tomtom_api_key: get("TOMTOM_API_KEY"),
            openweather_api_key: get("OPENWEATHER_API_KEY"),
            tomtom_base_url: get("TOMTOM_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.tomtom_base_url),
            openweather_base_url: get("OPENWEATHER_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.openweather_base_url),
            upstream_timeout: Duration::from_secs(timeout_secs),
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections,
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
        })
    }
}
