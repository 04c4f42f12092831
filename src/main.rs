use std::str::FromStr;

use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::config::app_config::AppConfig;
use crate::logger::init_logger;
use crate::services::delivery_service::DeliveryService;
use crate::services::optimize_service::OptimizeService;
use crate::services::travel_time_service::TravelTimeService;
use crate::services::weather_service::WeatherService;

mod app;
mod config;
mod handlers;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

async fn setup_database(config: &AppConfig) -> Result<Pool<Sqlite>> {
    // Carpeta "data" para el archivo SQLite por defecto
    std::fs::create_dir_all("data").context("No se pudo crear directorio 'data'")?;

    log::info!("Conectando a SQLite en {}", config.database_url);

    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("DATABASE_URL inválida: {}", config.database_url))?
        .create_if_missing(true);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await
        .context("No se pudo conectar a la base de datos SQLite.")?;

    Ok(db_pool)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let config = AppConfig::from_env().expect("Configuración inválida");
    if config.tomtom_api_key.is_none() {
        log::warn!("TOMTOM_API_KEY no definida: se usará el tiempo de viaje por defecto");
    }
    if config.openweather_api_key.is_none() {
        log::warn!("OPENWEATHER_API_KEY no definida: el clima será 'unknown'");
    }

    let db_pool = setup_database(&config)
        .await
        .expect("No se pudo inicializar la base de datos");

    let delivery_service = DeliveryService::new(db_pool.clone());
    if let Err(e) = delivery_service.run_migrations().await {
        panic!("Fallo en migraciones de 'deliveries': {:?}", e);
    }

    let travel_time_service =
        TravelTimeService::new(&config).expect("No se pudo inicializar TravelTimeService");
    let weather_service =
        WeatherService::new(&config).expect("No se pudo inicializar WeatherService");

    let optimize_service = OptimizeService::new(
        travel_time_service,
        weather_service,
        delivery_service.clone(),
    );

    // Levantar servidor
    let bind_addr = (config.server_host.clone(), config.server_port);
    log::info!("Levantando servidor en {}:{}", bind_addr.0, bind_addr.1);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(delivery_service.clone()))
            .app_data(web::Data::new(optimize_service.clone()))
            .configure(app::init_app)
    })
    .bind(bind_addr)?
    .run()
    .await
}
