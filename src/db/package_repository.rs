// src/db/package_repository.rs
// DOCUMENTATION: Database access layer for packages and itineraries
// PURPOSE: Package search, add-on join tables, itinerary management

use crate::db::destination_repository::is_unique_violation;
use crate::errors::TravelError;
use crate::models::{
    CreatePackageRequest, Itinerary, ItineraryDay, Package, PackageQuery, SetItineraryRequest,
    UpdatePackageRequest,
};
use sqlx::PgPool;
use uuid::Uuid;

const PACKAGE_COLUMNS: &str = r#"
    id, name, slug, description, main_destination_id,
    duration_days, duration_nights, adult_price, child_price,
    inclusions, exclusions, featured_image_url,
    total_bookings, rating, total_reviews,
    status, is_featured, meta_title, meta_description,
    created_at, updated_at, published_at
"#;

/// PackageRepository: all database operations for packages
pub struct PackageRepository;

impl PackageRepository {
    /// Insert a new package (created as draft) and return the record
    pub async fn create(
        pool: &PgPool,
        req: &CreatePackageRequest,
        slug: &str,
    ) -> Result<Package, TravelError> {
        let inserted: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO packages (
                name, slug, description, main_destination_id,
                duration_days, duration_nights, adult_price, child_price,
                inclusions, exclusions, featured_image_url, is_featured,
                meta_title, meta_description, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    'draft', NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(slug)
        .bind(&req.description)
        .bind(req.main_destination_id)
        .bind(req.duration_days)
        .bind(req.duration_nights)
        .bind(req.adult_price)
        .bind(req.child_price)
        .bind(&req.inclusions)
        .bind(&req.exclusions)
        .bind(&req.featured_image_url)
        .bind(req.is_featured)
        .bind(&req.meta_title)
        .bind(&req.meta_description)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return TravelError::AlreadyExists(format!("package slug '{}'", slug));
            }
            log::error!("Failed to create package: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let package = Self::get_by_id(pool, inserted.0).await?;
        log::info!("Created package: {} ({})", package.name, package.id);
        Ok(package)
    }

    /// Retrieve package by id, any status (admin paths)
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Package, TravelError> {
        let sql = format!("SELECT {} FROM packages WHERE id = $1", PACKAGE_COLUMNS);

        sqlx::query_as::<_, Package>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching package: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("package {}", id)))
    }

    /// Retrieve a published package by id (checkout path)
    pub async fn get_published_by_id(pool: &PgPool, id: Uuid) -> Result<Package, TravelError> {
        let package = Self::get_by_id(pool, id).await?;
        if !package.is_published() {
            return Err(TravelError::NotFound(format!("package {}", id)));
        }
        Ok(package)
    }

    /// Retrieve package by slug
    /// published_only gates the public detail endpoint
    pub async fn get_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Package, TravelError> {
        let mut sql = format!("SELECT {} FROM packages WHERE slug = $1", PACKAGE_COLUMNS);
        if published_only {
            sql.push_str(" AND status = 'published'");
        }

        sqlx::query_as::<_, Package>(&sql)
            .bind(slug)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching package '{}': {}", slug, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("package '{}'", slug)))
    }

    /// Search published packages with filters and pagination
    /// Returns tuple: (results, total_count)
    pub async fn search(
        pool: &PgPool,
        query: &PackageQuery,
        destination_id: Option<Uuid>,
    ) -> Result<(Vec<Package>, i64), TravelError> {
        let limit = query.limit.unwrap_or(20).clamp(1, 100);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let mut where_clauses = vec!["status = 'published'".to_string()];

        if let Some(q) = &query.q {
            let escaped = q.replace('\'', "''");
            where_clauses.push(format!(
                "(name ILIKE '%{}%' OR description ILIKE '%{}%')",
                escaped, escaped
            ));
        }
        if let Some(dest) = destination_id {
            where_clauses.push(format!("main_destination_id = '{}'", dest));
        }
        if query.featured == Some(true) {
            where_clauses.push("is_featured = true".to_string());
        }
        if let Some(min) = query.min_duration {
            where_clauses.push(format!("duration_days >= {}", min));
        }
        if let Some(max) = query.max_duration {
            where_clauses.push(format!("duration_days <= {}", max));
        }
        if let Some(max_price) = query.max_price {
            where_clauses.push(format!("adult_price <= {}", max_price));
        }

        let where_clause = format!("WHERE {}", where_clauses.join(" AND "));

        let count_sql = format!("SELECT COUNT(*) FROM packages {}", where_clause);
        let count_result: (i64,) = sqlx::query_as(&count_sql)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Package count query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;
        let total = count_result.0;

        let sql = format!(
            "SELECT {} FROM packages {} ORDER BY is_featured DESC, published_at DESC NULLS LAST, created_at DESC LIMIT {} OFFSET {}",
            PACKAGE_COLUMNS, where_clause, limit, offset
        );

        log::debug!("Executing package search: {}", sql);

        let packages = sqlx::query_as::<_, Package>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Package search query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;

        Ok((packages, total))
    }

    /// Partial update - only provided fields are modified
    /// First transition to published stamps published_at
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdatePackageRequest,
    ) -> Result<Package, TravelError> {
        let status = req.status.map(|s| s.as_str());

        let updated: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE packages
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                duration_days = COALESCE($3, duration_days),
                duration_nights = COALESCE($4, duration_nights),
                adult_price = COALESCE($5, adult_price),
                child_price = COALESCE($6, child_price),
                inclusions = COALESCE($7, inclusions),
                exclusions = COALESCE($8, exclusions),
                featured_image_url = COALESCE($9, featured_image_url),
                is_featured = COALESCE($10, is_featured),
                meta_title = COALESCE($11, meta_title),
                meta_description = COALESCE($12, meta_description),
                status = COALESCE($13, status),
                published_at = CASE
                    WHEN $13 = 'published' AND published_at IS NULL THEN NOW()
                    ELSE published_at
                END,
                updated_at = NOW()
            WHERE id = $14
            RETURNING id
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.duration_days)
        .bind(req.duration_nights)
        .bind(req.adult_price)
        .bind(req.child_price)
        .bind(&req.inclusions)
        .bind(&req.exclusions)
        .bind(&req.featured_image_url)
        .bind(req.is_featured)
        .bind(&req.meta_title)
        .bind(&req.meta_description)
        .bind(status)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for package {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let (id,) = updated.ok_or_else(|| TravelError::NotFound(format!("package {}", id)))?;
        Self::get_by_id(pool, id).await
    }

    /// Archive a package (soft delete for the catalog)
    pub async fn archive(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        let rows =
            sqlx::query("UPDATE packages SET status = 'archived', updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await
                .map_err(|e| {
                    log::error!("Archive failed for package {}: {}", id, e);
                    TravelError::DatabaseError(e.to_string())
                })?
                .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("package {}", id)));
        }

        log::info!("Archived package: {}", id);
        Ok(())
    }

    /// Replace the add-on join sets for a package
    pub async fn set_options(
        pool: &PgPool,
        package_id: Uuid,
        accommodation_ids: &[Uuid],
        travel_mode_ids: &[Uuid],
    ) -> Result<(), TravelError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open transaction: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        sqlx::query("DELETE FROM package_accommodations WHERE package_id = $1")
            .bind(package_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM package_travel_modes WHERE package_id = $1")
            .bind(package_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

        for acc_id in accommodation_ids {
            sqlx::query(
                "INSERT INTO package_accommodations (package_id, accommodation_id) VALUES ($1, $2)",
            )
            .bind(package_id)
            .bind(acc_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Failed to link accommodation {}: {}", acc_id, e);
                TravelError::DatabaseError(e.to_string())
            })?;
        }

        for mode_id in travel_mode_ids {
            sqlx::query(
                "INSERT INTO package_travel_modes (package_id, travel_mode_id) VALUES ($1, $2)",
            )
            .bind(package_id)
            .bind(mode_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Failed to link travel mode {}: {}", mode_id, e);
                TravelError::DatabaseError(e.to_string())
            })?;
        }

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit option update: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!(
            "Set package {} options: {} accommodations, {} travel modes",
            package_id,
            accommodation_ids.len(),
            travel_mode_ids.len()
        );
        Ok(())
    }

    /// Ids of accommodations offered with a package
    pub async fn accommodation_ids(pool: &PgPool, package_id: Uuid) -> Result<Vec<Uuid>, TravelError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT accommodation_id FROM package_accommodations WHERE package_id = $1",
        )
        .bind(package_id)
        .fetch_all(pool)
        .await
        .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Ids of travel modes offered with a package
    pub async fn travel_mode_ids(pool: &PgPool, package_id: Uuid) -> Result<Vec<Uuid>, TravelError> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT travel_mode_id FROM package_travel_modes WHERE package_id = $1",
        )
        .bind(package_id)
        .fetch_all(pool)
        .await
        .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Replace a package's itinerary and days wholesale
    pub async fn set_itinerary(
        pool: &PgPool,
        package_id: Uuid,
        req: &SetItineraryRequest,
    ) -> Result<(), TravelError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open transaction: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        // Cascade removes the old days
        sqlx::query("DELETE FROM itineraries WHERE package_id = $1")
            .bind(package_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

        let (itinerary_id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO itineraries (package_id, title, overview, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(package_id)
        .bind(&req.title)
        .bind(&req.overview)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Failed to create itinerary for package {}: {}", package_id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        for day in &req.days {
            sqlx::query(
                r#"
                INSERT INTO itinerary_days (
                    itinerary_id, day_number, title, description,
                    destination_id, accommodation_id,
                    breakfast, lunch, dinner, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
                "#,
            )
            .bind(itinerary_id)
            .bind(day.day_number)
            .bind(&day.title)
            .bind(&day.description)
            .bind(day.destination_id)
            .bind(day.accommodation_id)
            .bind(day.breakfast)
            .bind(day.lunch)
            .bind(day.dinner)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    return TravelError::InvalidInput(format!(
                        "duplicate itinerary day number {}",
                        day.day_number
                    ));
                }
                log::error!("Failed to insert itinerary day: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;
        }

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit itinerary update: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        log::info!(
            "Set itinerary for package {}: {} days",
            package_id,
            req.days.len()
        );
        Ok(())
    }

    /// Fetch a package's itinerary with days ordered by day_number
    pub async fn get_itinerary(
        pool: &PgPool,
        package_id: Uuid,
    ) -> Result<Option<(Itinerary, Vec<ItineraryDay>)>, TravelError> {
        let itinerary = sqlx::query_as::<_, Itinerary>(
            "SELECT id, package_id, title, overview, created_at, updated_at
             FROM itineraries WHERE package_id = $1",
        )
        .bind(package_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Itinerary fetch error for package {}: {}", package_id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let Some(itinerary) = itinerary else {
            return Ok(None);
        };

        let days = sqlx::query_as::<_, ItineraryDay>(
            r#"
            SELECT id, itinerary_id, day_number, title, description,
                   destination_id, accommodation_id, breakfast, lunch, dinner,
                   created_at, updated_at
            FROM itinerary_days
            WHERE itinerary_id = $1
            ORDER BY day_number
            "#,
        )
        .bind(itinerary.id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Itinerary days fetch error: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        Ok(Some((itinerary, days)))
    }

    /// Bump the booking counter after a confirmed checkout
    pub async fn increment_total_bookings(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        sqlx::query(
            "UPDATE packages SET total_bookings = total_bookings + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to bump booking count for package {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }
}
