//! handlers/health_handler.rs

use actix_web::HttpResponse;

/// GET /
pub async fn root_endpoint() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": "RouteMonk Backend Running!" }))
}
