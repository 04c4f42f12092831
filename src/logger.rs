//! logger.rs
//! Logger del servicio (env_logger). Por defecto `info`, pero sqlx registra
//! cada query y reqwest/hyper cada conexión a los upstreams, así que esos
//! módulos quedan en `warn` salvo que RUST_LOG diga otra cosa.

use env_logger::Builder;
use log::LevelFilter;

/// Módulos ruidosos y el nivel con el que arrancan.
const QUIET_MODULES: &[(&str, LevelFilter)] = &[
    ("sqlx", LevelFilter::Warn),
    ("reqwest", LevelFilter::Warn),
    ("hyper", LevelFilter::Warn),
    ("hyper_util", LevelFilter::Warn),
    ("actix_server", LevelFilter::Info),
];

/// Arma el builder. `filters` tiene la sintaxis de RUST_LOG y se aplica
/// después de los módulos silenciados, así que puede pisarlos.
fn build_logger(filters: &str) -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Info);
    for (module, level) in QUIET_MODULES {
        builder.filter_module(module, *level);
    }
    builder.parse_filters(filters).format_timestamp_secs();
    builder
}

pub fn init_logger() {
    let log_env = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    build_logger(&log_env).init();
}
