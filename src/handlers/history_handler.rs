//! handlers/history_handler.rs
use actix_web::{web, HttpResponse};

use crate::models::delivery_model::HistoryResponse;
use crate::services::delivery_service::DeliveryService;

/// GET /history
pub async fn get_history_endpoint(delivery_service: web::Data<DeliveryService>) -> HttpResponse {
    match delivery_service.list_deliveries().await {
        Ok(history) => HttpResponse::Ok().json(HistoryResponse { history }),
        Err(e) => {
            log::error!("Error listando historial: {:?}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error",
                "details": format!("{:?}", e)
            }))
        }
    }
}
