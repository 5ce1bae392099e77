// src/db/accommodation_repository.rs
// DOCUMENTATION: Database access layer for accommodations

use crate::db::destination_repository::is_unique_violation;
use crate::errors::TravelError;
use crate::models::{Accommodation, CreateAccommodationRequest, UpdateAccommodationRequest};
use sqlx::PgPool;
use uuid::Uuid;

const ACCOMMODATION_COLUMNS: &str = r#"
    id, name, slug, accommodation_type, description, destination_id,
    address, price_per_room_per_night, max_occupancy_per_room, total_rooms,
    image_url, amenities, is_active, is_featured, rating, total_reviews,
    created_at, updated_at
"#;

/// AccommodationRepository: all database operations for accommodations
pub struct AccommodationRepository;

impl AccommodationRepository {
    /// Insert a new accommodation and return the created record
    pub async fn create(
        pool: &PgPool,
        req: &CreateAccommodationRequest,
        slug: &str,
    ) -> Result<Accommodation, TravelError> {
        let inserted: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO accommodations (
                name, slug, accommodation_type, description, destination_id,
                address, price_per_room_per_night, max_occupancy_per_room,
                total_rooms, image_url, amenities, is_featured,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(slug)
        .bind(req.accommodation_type.as_str())
        .bind(&req.description)
        .bind(req.destination_id)
        .bind(&req.address)
        .bind(req.price_per_room_per_night)
        .bind(req.max_occupancy_per_room)
        .bind(req.total_rooms)
        .bind(&req.image_url)
        .bind(&req.amenities)
        .bind(req.is_featured)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return TravelError::AlreadyExists(format!("accommodation slug '{}'", slug));
            }
            log::error!("Failed to create accommodation: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let accommodation = Self::get_by_id(pool, inserted.0).await?;
        log::info!("Created accommodation: {} ({})", accommodation.name, accommodation.id);
        Ok(accommodation)
    }

    /// Retrieve accommodation by id (active only)
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Accommodation, TravelError> {
        let sql = format!(
            "SELECT {} FROM accommodations WHERE id = $1 AND is_active = true",
            ACCOMMODATION_COLUMNS
        );

        sqlx::query_as::<_, Accommodation>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching accommodation: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("accommodation {}", id)))
    }

    /// Retrieve accommodation by slug (active only)
    pub async fn get_by_slug(pool: &PgPool, slug: &str) -> Result<Accommodation, TravelError> {
        let sql = format!(
            "SELECT {} FROM accommodations WHERE slug = $1 AND is_active = true",
            ACCOMMODATION_COLUMNS
        );

        sqlx::query_as::<_, Accommodation>(&sql)
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching accommodation '{}': {}", slug, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("accommodation '{}'", slug)))
    }

    /// Fetch the active subset of the given ids, original order not preserved
    /// Stale cart references simply drop out of the result
    pub async fn get_active_by_ids(
        pool: &PgPool,
        ids: &[Uuid],
    ) -> Result<Vec<Accommodation>, TravelError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM accommodations WHERE id = ANY($1) AND is_active = true",
            ACCOMMODATION_COLUMNS
        );

        sqlx::query_as::<_, Accommodation>(&sql)
            .bind(ids)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Accommodation batch fetch error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// List active accommodations with optional filters
    /// Ordering: featured first, then rating, then name
    pub async fn list(
        pool: &PgPool,
        destination_id: Option<Uuid>,
        accommodation_type: Option<&str>,
        featured_only: bool,
    ) -> Result<Vec<Accommodation>, TravelError> {
        let mut where_clauses = vec!["is_active = true".to_string()];

        if let Some(dest) = destination_id {
            where_clauses.push(format!("destination_id = '{}'", dest));
        }
        if let Some(t) = accommodation_type {
            where_clauses.push(format!("accommodation_type = '{}'", t.replace('\'', "''")));
        }
        if featured_only {
            where_clauses.push("is_featured = true".to_string());
        }

        let sql = format!(
            "SELECT {} FROM accommodations WHERE {} ORDER BY is_featured DESC, rating DESC, name",
            ACCOMMODATION_COLUMNS,
            where_clauses.join(" AND ")
        );

        sqlx::query_as::<_, Accommodation>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Accommodation list query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// Partial update - only provided fields are modified
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateAccommodationRequest,
    ) -> Result<Accommodation, TravelError> {
        let updated: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE accommodations
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                address = COALESCE($3, address),
                price_per_room_per_night = COALESCE($4, price_per_room_per_night),
                max_occupancy_per_room = COALESCE($5, max_occupancy_per_room),
                total_rooms = COALESCE($6, total_rooms),
                image_url = COALESCE($7, image_url),
                amenities = COALESCE($8, amenities),
                is_featured = COALESCE($9, is_featured),
                rating = COALESCE($10, rating),
                updated_at = NOW()
            WHERE id = $11 AND is_active = true
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.address)
        .bind(req.price_per_room_per_night)
        .bind(req.max_occupancy_per_room)
        .bind(req.total_rooms)
        .bind(&req.image_url)
        .bind(&req.amenities)
        .bind(req.is_featured)
        .bind(req.rating)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for accommodation {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let (id,) = updated.ok_or_else(|| TravelError::NotFound(format!("accommodation {}", id)))?;
        Self::get_by_id(pool, id).await
    }

    /// Soft delete
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        let rows = sqlx::query(
            "UPDATE accommodations SET is_active = false, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Delete failed for accommodation {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("accommodation {}", id)));
        }

        log::info!("Deactivated accommodation: {}", id);
        Ok(())
    }
}
