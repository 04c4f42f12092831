//! handlers/mod.rs
pub mod health_handler;
pub mod history_handler;
pub mod optimize_handler;
