// src/db/travel_mode_repository.rs
// DOCUMENTATION: Database access layer for travel modes

use crate::errors::TravelError;
use crate::models::{CreateTravelModeRequest, TravelMode, UpdateTravelModeRequest};
use sqlx::PgPool;
use uuid::Uuid;

const TRAVEL_MODE_COLUMNS: &str = r#"
    id, name, transport_type, departure_location, arrival_location,
    departure_time, arrival_time, duration_minutes, price_per_person,
    child_discount_percentage, description, terms_and_conditions,
    total_capacity, is_active, created_at, updated_at
"#;

/// TravelModeRepository: all database operations for travel modes
pub struct TravelModeRepository;

impl TravelModeRepository {
    /// Insert a new travel mode and return the created record
    pub async fn create(
        pool: &PgPool,
        req: &CreateTravelModeRequest,
    ) -> Result<TravelMode, TravelError> {
        let inserted: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO travel_modes (
                name, transport_type, departure_location, arrival_location,
                departure_time, arrival_time, duration_minutes, price_per_person,
                child_discount_percentage, description, terms_and_conditions,
                total_capacity, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(req.transport_type.as_str())
        .bind(&req.departure_location)
        .bind(&req.arrival_location)
        .bind(req.departure_time)
        .bind(req.arrival_time)
        .bind(req.duration_minutes)
        .bind(req.price_per_person)
        .bind(req.child_discount_percentage)
        .bind(&req.description)
        .bind(&req.terms_and_conditions)
        .bind(req.total_capacity)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to create travel mode: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let mode = Self::get_by_id(pool, inserted.0).await?;
        log::info!("Created travel mode: {} ({})", mode.name, mode.id);
        Ok(mode)
    }

    /// Retrieve travel mode by id (active only)
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<TravelMode, TravelError> {
        let sql = format!(
            "SELECT {} FROM travel_modes WHERE id = $1 AND is_active = true",
            TRAVEL_MODE_COLUMNS
        );

        sqlx::query_as::<_, TravelMode>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching travel mode: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("travel mode {}", id)))
    }

    /// Fetch the active subset of the given ids
    pub async fn get_active_by_ids(
        pool: &PgPool,
        ids: &[Uuid],
    ) -> Result<Vec<TravelMode>, TravelError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM travel_modes WHERE id = ANY($1) AND is_active = true",
            TRAVEL_MODE_COLUMNS
        );

        sqlx::query_as::<_, TravelMode>(&sql)
            .bind(ids)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Travel mode batch fetch error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// List active travel modes, optionally filtered by transport type
    /// Ordering mirrors timetable displays: type, then departure time
    pub async fn list(
        pool: &PgPool,
        transport_type: Option<&str>,
    ) -> Result<Vec<TravelMode>, TravelError> {
        let mut where_clauses = vec!["is_active = true".to_string()];

        if let Some(t) = transport_type {
            where_clauses.push(format!("transport_type = '{}'", t.replace('\'', "''")));
        }

        let sql = format!(
            "SELECT {} FROM travel_modes WHERE {} ORDER BY transport_type, departure_time",
            TRAVEL_MODE_COLUMNS,
            where_clauses.join(" AND ")
        );

        sqlx::query_as::<_, TravelMode>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Travel mode list query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// Partial update - only provided fields are modified
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateTravelModeRequest,
    ) -> Result<TravelMode, TravelError> {
        let updated: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE travel_modes
            SET name = COALESCE($1, name),
                departure_time = COALESCE($2, departure_time),
                arrival_time = COALESCE($3, arrival_time),
                duration_minutes = COALESCE($4, duration_minutes),
                price_per_person = COALESCE($5, price_per_person),
                child_discount_percentage = COALESCE($6, child_discount_percentage),
                description = COALESCE($7, description),
                terms_and_conditions = COALESCE($8, terms_and_conditions),
                total_capacity = COALESCE($9, total_capacity),
                updated_at = NOW()
            WHERE id = $10 AND is_active = true
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(req.departure_time)
        .bind(req.arrival_time)
        .bind(req.duration_minutes)
        .bind(req.price_per_person)
        .bind(req.child_discount_percentage)
        .bind(&req.description)
        .bind(&req.terms_and_conditions)
        .bind(req.total_capacity)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for travel mode {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let (id,) = updated.ok_or_else(|| TravelError::NotFound(format!("travel mode {}", id)))?;
        Self::get_by_id(pool, id).await
    }

    /// Soft delete
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        let rows = sqlx::query(
            "UPDATE travel_modes SET is_active = false, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Delete failed for travel mode {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("travel mode {}", id)));
        }

        log::info!("Deactivated travel mode: {}", id);
        Ok(())
    }
}
