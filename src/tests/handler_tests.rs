//! tests/handler_tests.rs
//! Pruebas HTTP de punta a punta sobre `app::init_app`.

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};
    use wiremock::MockServer;

    use crate::app::init_app;
    use crate::models::delivery_model::HistoryResponse;
    use crate::models::optimize_model::OptimizeResponse;
    use crate::services::delivery_service::DeliveryService;
    use crate::services::optimize_service::OptimizeService;
    use crate::services::travel_time_service::TravelTimeService;
    use crate::services::weather_service::WeatherService;
    use crate::tests::{mount_route_ok, mount_weather_ok, temp_delivery_service, test_config};

    fn services(
        tomtom: &MockServer,
        weather: &MockServer,
        deliveries: DeliveryService,
    ) -> (DeliveryService, OptimizeService) {
        let config = test_config(tomtom, weather);
        let optimize = OptimizeService::new(
            TravelTimeService::new(&config).expect("travel time"),
            WeatherService::new(&config).expect("weather"),
            deliveries.clone(),
        );
        (deliveries, optimize)
    }

    #[actix_rt::test]
    async fn test_root_message() {
        let app = test::init_service(App::new().configure(init_app)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "RouteMonk Backend Running!");
    }

    #[actix_rt::test]
    async fn test_optimize_then_history() {
        let tomtom = MockServer::start().await;
        let weather = MockServer::start().await;
        mount_route_ok(&tomtom, 2460).await;
        mount_weather_ok(&weather, "haze", "Mumbai", 31.0).await;
        let (deliveries, _dir) = temp_delivery_service(true).await;
        let (deliveries, optimize) = services(&tomtom, &weather, deliveries);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(deliveries))
                .app_data(web::Data::new(optimize))
                .configure(init_app),
        )
        .await;

        for (uri, perishability) in [("/optimize", 8), ("/optimize/", 2)] {
            let req = test::TestRequest::post()
                .uri(uri)
                .set_json(json!({
                    "perishability": perishability,
                    "start": "19.0760,72.8777",
                    "end": "18.9220,72.8347"
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);

            let body: OptimizeResponse = test::read_body_json(resp).await;
            assert!(body.error.is_none());
            assert_eq!(body.travel_time_sec, Some(2460));
            assert_eq!(body.final_score, Some(perishability as f64 * 41.0));
        }

        let req = test::TestRequest::get().uri("/history").to_request();
        let history: HistoryResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(history.history.len(), 2);
        // Más nuevo primero
        assert_eq!(history.history[0].perishability, 2);
        assert_eq!(history.history[1].perishability, 8);
    }

    #[actix_rt::test]
    async fn test_optimize_rejects_out_of_range_perishability() {
        let tomtom = MockServer::start().await;
        let weather = MockServer::start().await;
        let (deliveries, _dir) = temp_delivery_service(true).await;
        let (deliveries, optimize) = services(&tomtom, &weather, deliveries);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(deliveries.clone()))
                .app_data(web::Data::new(optimize))
                .configure(init_app),
        )
        .await;

        for perishability in [0, 11, -3] {
            let req = test::TestRequest::post()
                .uri("/optimize")
                .set_json(json!({ "perishability": perishability, "start": "1,1", "end": "2,2" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }

        assert!(deliveries.list_deliveries().await.unwrap().is_empty());
        // Ningún upstream fue consultado
        assert!(tomtom.received_requests().await.unwrap_or_default().is_empty());
    }

    #[actix_rt::test]
    async fn test_persistence_failure_is_reported_in_band() {
        let tomtom = MockServer::start().await;
        let weather = MockServer::start().await;
        mount_route_ok(&tomtom, 600).await;
        mount_weather_ok(&weather, "haze", "Mumbai", 31.0).await;
        let (deliveries, _dir) = temp_delivery_service(false).await;
        let (deliveries, optimize) = services(&tomtom, &weather, deliveries);

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(deliveries))
                .app_data(web::Data::new(optimize))
                .configure(init_app),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/optimize")
            .set_json(json!({ "perishability": 5, "start": "19.0760,72.8777", "end": "18.9220,72.8347" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert!(!body["error"].as_str().unwrap_or_default().is_empty());
        assert_eq!(body["travel_time_sec"], 600);
        assert_eq!(body["weather"], "haze");
        assert_eq!(body["final_score"], 50.0);

        // El historial también falla, pero con status 500
        let req = test::TestRequest::get().uri("/history/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
