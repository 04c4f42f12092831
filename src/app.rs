//! app.rs
use crate::handlers::{health_handler, history_handler, optimize_handler};
use actix_web::web;

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health_handler::root_endpoint))
        .service(
            web::scope("/optimize")
                .route("", web::post().to(optimize_handler::optimize_route_endpoint))
                .route("/", web::post().to(optimize_handler::optimize_route_endpoint)),
        )
        .service(
            web::scope("/history")
                .route("", web::get().to(history_handler::get_history_endpoint))
                .route("/", web::get().to(history_handler::get_history_endpoint)),
        );
}
