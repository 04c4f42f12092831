//! services/delivery_service.rs
//! Persistencia de la tabla `deliveries`: solo INSERT y SELECT ordenado.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{Pool, Row, Sqlite};

use crate::models::delivery_model::{DeliveryRecord, NewDelivery};

#[derive(Clone, Debug)]
pub struct DeliveryService {
    db_pool: Pool<Sqlite>,
}

impl DeliveryService {
    pub fn new(db_pool: Pool<Sqlite>) -> Self {
        DeliveryService { db_pool }
    }

    /// Corre migraciones con sqlx
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db_pool)
            .await
            .context("Fallo en migraciones de 'deliveries'")?;
        Ok(())
    }

    /// Inserta un registro y devuelve su id. `created_at` lo asigna el store.
    pub async fn insert_delivery(&self, delivery: &NewDelivery) -> Result<i64> {
        // Microsegundos + 'Z': el orden lexicográfico coincide con el cronológico
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        // La conexión se libera al salir del scope, falle o no el INSERT
        let mut conn = self
            .db_pool
            .acquire()
            .await
            .context("No se pudo obtener conexión a la base de datos")?;

        let result = sqlx::query(
            r#"
            INSERT INTO deliveries (
                city, perishability, travel_time_sec, weather, final_score, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&delivery.city)
        .bind(delivery.perishability)
        .bind(delivery.travel_time_sec)
        .bind(&delivery.weather)
        .bind(delivery.final_score)
        .bind(&now)
        .execute(&mut *conn)
        .await
        .context("Fallo al insertar delivery")?;

        Ok(result.last_insert_rowid())
    }

    /// Todos los registros, del más nuevo al más viejo. Sin paginación.
    pub async fn list_deliveries(&self) -> Result<Vec<DeliveryRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT
                id, city, perishability, travel_time_sec,
                weather, final_score, created_at
            FROM deliveries
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.db_pool)
        .await
        .context("Fallo al listar deliveries")?;

        let mut result = Vec::with_capacity(rows.len());
        for r in rows {
            let created_at: String = r.try_get("created_at")?;
            result.push(DeliveryRecord {
                id: r.try_get("id")?,
                city: r.try_get("city")?,
                perishability: r.try_get("perishability")?,
                travel_time_sec: r.try_get("travel_time_sec")?,
                weather: r.try_get("weather")?,
                final_score: r.try_get("final_score")?,
                created_at: created_at
                    .parse::<DateTime<Utc>>()
                    .with_context(|| format!("created_at inválido: '{}'", created_at))?,
            });
        }
        Ok(result)
    }
}
