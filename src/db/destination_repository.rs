// src/db/destination_repository.rs
// DOCUMENTATION: Database access layer for destinations
// PURPOSE: Hierarchy-aware CRUD over the destinations table

use crate::errors::TravelError;
use crate::models::{CreateDestinationRequest, Destination, UpdateDestinationRequest};
use sqlx::PgPool;
use uuid::Uuid;

const DESTINATION_COLUMNS: &str = r#"
    id, name, slug, destination_type, description, image_url,
    parent_id, meta_title, meta_description, starting_price,
    display_order, is_featured, is_active, created_at, updated_at
"#;

/// DestinationRepository: all database operations for destinations
pub struct DestinationRepository;

impl DestinationRepository {
    /// Insert a new destination and return the created record
    pub async fn create(
        pool: &PgPool,
        req: &CreateDestinationRequest,
        slug: &str,
    ) -> Result<Destination, TravelError> {
        let inserted: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO destinations (
                name, slug, destination_type, description, image_url,
                parent_id, meta_title, meta_description, starting_price,
                display_order, is_featured, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(slug)
        .bind(req.destination_type.as_str())
        .bind(&req.description)
        .bind(&req.image_url)
        .bind(req.parent_id)
        .bind(&req.meta_title)
        .bind(&req.meta_description)
        .bind(req.starting_price)
        .bind(req.display_order)
        .bind(req.is_featured)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return TravelError::AlreadyExists(format!("destination slug '{}'", slug));
            }
            log::error!("Failed to create destination: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let destination = Self::get_by_id(pool, inserted.0).await?;
        log::info!("Created destination: {} ({})", destination.name, destination.id);
        Ok(destination)
    }

    /// Retrieve destination by id (active only)
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Destination, TravelError> {
        let sql = format!(
            "SELECT {} FROM destinations WHERE id = $1 AND is_active = true",
            DESTINATION_COLUMNS
        );

        sqlx::query_as::<_, Destination>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching destination: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("destination {}", id)))
    }

    /// Retrieve destination by slug (active only)
    pub async fn get_by_slug(pool: &PgPool, slug: &str) -> Result<Destination, TravelError> {
        let sql = format!(
            "SELECT {} FROM destinations WHERE slug = $1 AND is_active = true",
            DESTINATION_COLUMNS
        );

        sqlx::query_as::<_, Destination>(&sql)
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching destination '{}': {}", slug, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("destination '{}'", slug)))
    }

    /// List active destinations with optional filters
    /// Ordering follows the catalog convention: display_order, then name
    pub async fn list(
        pool: &PgPool,
        destination_type: Option<&str>,
        parent_id: Option<Uuid>,
        featured_only: bool,
    ) -> Result<Vec<Destination>, TravelError> {
        let mut where_clauses = vec!["is_active = true".to_string()];

        if let Some(t) = destination_type {
            where_clauses.push(format!("destination_type = '{}'", t.replace('\'', "''")));
        }
        if let Some(parent) = parent_id {
            where_clauses.push(format!("parent_id = '{}'", parent));
        }
        if featured_only {
            where_clauses.push("is_featured = true".to_string());
        }

        let sql = format!(
            "SELECT {} FROM destinations WHERE {} ORDER BY display_order, name",
            DESTINATION_COLUMNS,
            where_clauses.join(" AND ")
        );

        sqlx::query_as::<_, Destination>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Destination list query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// Direct active children of a destination
    pub async fn children(pool: &PgPool, parent_id: Uuid) -> Result<Vec<Destination>, TravelError> {
        Self::list(pool, None, Some(parent_id), false).await
    }

    /// Ancestor chain from the destination up to its country
    /// DOCUMENTATION: Recursive CTE walking parent_id; nearest first
    pub async fn ancestors(pool: &PgPool, id: Uuid) -> Result<Vec<Destination>, TravelError> {
        let sql = format!(
            r#"
            WITH RECURSIVE chain AS (
                SELECT d.*, 0 AS depth FROM destinations d WHERE d.id = $1
                UNION ALL
                SELECT p.*, chain.depth + 1
                FROM destinations p
                JOIN chain ON chain.parent_id = p.id
            )
            SELECT {} FROM chain WHERE id <> $1 ORDER BY depth
            "#,
            DESTINATION_COLUMNS
        );

        sqlx::query_as::<_, Destination>(&sql)
            .bind(id)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Ancestor query error for destination {}: {}", id, e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// Partial update - only provided fields are modified
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateDestinationRequest,
    ) -> Result<Destination, TravelError> {
        let updated: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE destinations
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                image_url = COALESCE($3, image_url),
                meta_title = COALESCE($4, meta_title),
                meta_description = COALESCE($5, meta_description),
                starting_price = COALESCE($6, starting_price),
                display_order = COALESCE($7, display_order),
                is_featured = COALESCE($8, is_featured),
                updated_at = NOW()
            WHERE id = $9 AND is_active = true
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(&req.image_url)
        .bind(&req.meta_title)
        .bind(&req.meta_description)
        .bind(req.starting_price)
        .bind(req.display_order)
        .bind(req.is_featured)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for destination {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let (id,) = updated.ok_or_else(|| TravelError::NotFound(format!("destination {}", id)))?;
        Self::get_by_id(pool, id).await
    }

    /// Soft delete - sets is_active=false instead of physical deletion
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        let rows = sqlx::query(
            "UPDATE destinations SET is_active = false, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Delete failed for destination {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("destination {}", id)));
        }

        log::info!("Deactivated destination: {}", id);
        Ok(())
    }
}

/// Detect a Postgres unique-constraint violation (SQLSTATE 23505)
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}
