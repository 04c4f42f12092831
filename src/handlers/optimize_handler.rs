//! handlers/optimize_handler.rs
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::models::optimize_model::OptimizeRequest;
use crate::services::optimize_service::OptimizeService;

/// POST /optimize
/// Errores de upstream o de base de datos van dentro del JSON (status 200).
/// Solo una perecibilidad fuera de rango devuelve 400.
pub async fn optimize_route_endpoint(
    optimize_service: web::Data<OptimizeService>,
    body: web::Json<OptimizeRequest>,
) -> HttpResponse {
    let req = body.into_inner();

    if let Err(msg) = req.validate() {
        log::warn!("(optimize_route_endpoint) Petición rechazada: {}", msg);
        return HttpResponse::BadRequest().json(json!({
            "error": "Invalid request",
            "details": msg
        }));
    }

    let resp = optimize_service.optimize(&req).await;
    HttpResponse::Ok().json(resp)
}
