//! services/optimize_service.rs
//! Orquestador de /optimize: parsea, consulta ambos upstreams, calcula el
//! puntaje y persiste. Nunca devuelve error al transporte; los fallos viajan
//! en el campo `error` de la respuesta junto con lo ya calculado.

use anyhow::anyhow;
use tokio::task::JoinError;

use crate::{
    models::{
        delivery_model::NewDelivery,
        optimize_model::{parse_coordinate, OptimizeRequest, OptimizeResponse, RouteCoordinates},
        weather_model::{WeatherLookup, WeatherReport, UNKNOWN},
    },
    services::{
        delivery_service::DeliveryService,
        scoring,
        travel_time_service::{TravelTime, TravelTimeService},
        weather_service::WeatherService,
    },
};

#[derive(Clone, Debug)]
pub struct OptimizeService {
    travel_time_service: TravelTimeService,
    weather_service: WeatherService,
    delivery_service: DeliveryService,
}

/// Lo calculado hasta el momento en que algo falle.
#[derive(Debug, Default)]
struct Progress {
    travel_time: Option<TravelTime>,
    weather: Option<WeatherReport>,
    final_score: Option<f64>,
}

#[derive(Debug)]
enum PipelineFailure {
    Persistence(anyhow::Error),
    Unexpected(anyhow::Error),
}

impl OptimizeService {
    pub fn new(
        travel_time_service: TravelTimeService,
        weather_service: WeatherService,
        delivery_service: DeliveryService,
    ) -> Self {
        Self {
            travel_time_service,
            weather_service,
            delivery_service,
        }
    }

    pub async fn optimize(&self, req: &OptimizeRequest) -> OptimizeResponse {
        log::info!(
            "(optimize) Iniciando: start='{}', end='{}', perishability={}",
            req.start,
            req.end,
            req.perishability
        );

        let mut progress = Progress::default();
        let outcome = self.run_pipeline(req, &mut progress).await;
        finish(req, &progress, outcome)
    }

    async fn run_pipeline(
        &self,
        req: &OptimizeRequest,
        progress: &mut Progress,
    ) -> Result<i64, PipelineFailure> {
        // 1) Parseo: una coordenada inválida solo degrada el clima
        let start_coord = parse_coordinate(&req.start);
        if start_coord.is_none() {
            log::warn!(
                "(optimize) Coordenada de inicio inválida '{}', clima = unknown",
                req.start
            );
        }

        // 2) Ambos upstreams en paralelo; cada uno absorbe sus propios errores
        let travel_task = {
            let service = self.travel_time_service.clone();
            let (start, end) = (req.start.clone(), req.end.clone());
            tokio::spawn(async move { service.get_travel_time(&start, &end).await })
        };
        let weather_task = {
            let service = self.weather_service.clone();
            let raw_start = req.start.clone();
            tokio::spawn(async move {
                match start_coord {
                    Some(c) => service.get_weather_by_coordinates(c.lat, c.lng).await,
                    None => WeatherLookup::Unavailable {
                        reason: format!("coordenada de inicio inválida: '{}'", raw_start),
                    },
                }
            })
        };

        let (travel_joined, weather_joined) = tokio::join!(travel_task, weather_task);
        let (travel_time, weather) = merge_lookups(travel_joined, weather_joined, progress)?;

        if travel_time.is_fallback() {
            log::warn!("(optimize) Tiempo de viaje por defecto: {:?}", travel_time);
        }
        if !weather.is_resolved() {
            log::warn!("(optimize) Clima desconocido: {:?}", weather);
        }

        // 3) Puntaje
        let travel_time_sec = travel_time.seconds();
        let score = scoring::final_score(req.perishability, travel_time_sec);
        progress.final_score = Some(score);

        // 4) Persistir
        let report = weather.report();
        let delivery = NewDelivery {
            city: location_label(Some(&report), req.city.as_deref()),
            perishability: req.perishability,
            travel_time_sec,
            weather: report.description,
            final_score: score,
        };

        self.delivery_service
            .insert_delivery(&delivery)
            .await
            .map_err(PipelineFailure::Persistence)
    }
}

/// Junta los resultados de ambas tareas. Lo que sí llegó queda en `progress`
/// antes de propagar un fallo de cualquiera de las dos.
fn merge_lookups(
    travel_joined: Result<TravelTime, JoinError>,
    weather_joined: Result<WeatherLookup, JoinError>,
    progress: &mut Progress,
) -> Result<(TravelTime, WeatherLookup), PipelineFailure> {
    let travel_time =
        travel_joined.map_err(|e| anyhow!("La consulta de tiempo de viaje falló: {}", e));
    let weather = weather_joined.map_err(|e| anyhow!("La consulta de clima falló: {}", e));

    if let Ok(t) = &travel_time {
        progress.travel_time = Some(t.clone());
    }
    if let Ok(w) = &weather {
        progress.weather = Some(w.report());
    }
    let travel_time = travel_time.map_err(PipelineFailure::Unexpected)?;
    let weather = weather.map_err(PipelineFailure::Unexpected)?;
    Ok((travel_time, weather))
}

fn finish(
    req: &OptimizeRequest,
    progress: &Progress,
    outcome: Result<i64, PipelineFailure>,
) -> OptimizeResponse {
    let mut response = build_response(req, progress);

    match outcome {
        Ok(id) => {
            log::info!("(optimize) Delivery guardado con id={}", id);
            response.id = Some(id);
        }
        Err(PipelineFailure::Persistence(e)) => {
            log::error!("(optimize) No se pudo guardar el delivery: {:?}", e);
            response.error = Some(format!("Failed to save delivery: {:#}", e));
        }
        Err(PipelineFailure::Unexpected(e)) => {
            log::error!("(optimize) Error inesperado: {:?}", e);
            response.error = Some(format!("{:#}", e));
        }
    }

    response
}

/// Lugar resuelto por el clima; si no hay, la ciudad enviada; si no, "unknown".
fn location_label(weather: Option<&WeatherReport>, city: Option<&str>) -> String {
    if let Some(label) = weather
        .map(|w| w.location_label.as_str())
        .filter(|l| *l != UNKNOWN)
    {
        return label.to_string();
    }
    city.map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

fn build_response(req: &OptimizeRequest, progress: &Progress) -> OptimizeResponse {
    let weather = progress.weather.as_ref();
    OptimizeResponse {
        id: None,
        city: location_label(weather, req.city.as_deref()),
        travel_time_sec: progress.travel_time.as_ref().map(TravelTime::seconds),
        weather: weather
            .map(|w| w.description.clone())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        temperature: weather.and_then(|w| w.temperature),
        final_score: progress.final_score,
        coordinates: RouteCoordinates {
            start: req.start.clone(),
            end: req.end.clone(),
        },
        error: None,
    }
}
