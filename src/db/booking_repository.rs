// src/db/booking_repository.rs
// DOCUMENTATION: Database access layer for bookings
// PURPOSE: Booking persistence, lookup by reference, status and email-flag updates

use crate::errors::TravelError;
use crate::models::{Booking, BookingQuery, NewBooking};
use sqlx::PgPool;
use uuid::Uuid;

const BOOKING_COLUMNS: &str = r#"
    id, booking_reference, package_id, user_id,
    full_name, email, phone_number,
    number_of_adults, number_of_children, number_of_rooms,
    package_price, accommodation_price, travel_price, total_amount,
    special_requests, travel_date, status,
    confirmation_email_sent, admin_notification_sent,
    created_at, updated_at
"#;

/// BookingRepository: all database operations for bookings
pub struct BookingRepository;

impl BookingRepository {
    /// Insert a confirmed booking with its selected add-ons
    pub async fn create(pool: &PgPool, booking: &NewBooking) -> Result<Booking, TravelError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open transaction: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO bookings (
                booking_reference, package_id, user_id,
                full_name, email, phone_number,
                number_of_adults, number_of_children, number_of_rooms,
                package_price, accommodation_price, travel_price, total_amount,
                special_requests, travel_date, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, 'pending', NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(&booking.booking_reference)
        .bind(booking.package_id)
        .bind(booking.user_id)
        .bind(&booking.full_name)
        .bind(&booking.email)
        .bind(&booking.phone_number)
        .bind(booking.number_of_adults)
        .bind(booking.number_of_children)
        .bind(booking.number_of_rooms)
        .bind(booking.package_price)
        .bind(booking.accommodation_price)
        .bind(booking.travel_price)
        .bind(booking.total_amount)
        .bind(&booking.special_requests)
        .bind(booking.travel_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            log::error!(
                "Failed to insert booking {}: {}",
                booking.booking_reference,
                e
            );
            TravelError::DatabaseError(e.to_string())
        })?;

        for acc_id in &booking.accommodation_ids {
            sqlx::query(
                "INSERT INTO booking_accommodations (booking_id, accommodation_id) VALUES ($1, $2)",
            )
            .bind(id)
            .bind(acc_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Failed to link booking accommodation: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;
        }

        for mode_id in &booking.travel_mode_ids {
            sqlx::query(
                "INSERT INTO booking_travel_modes (booking_id, travel_mode_id) VALUES ($1, $2)",
            )
            .bind(id)
            .bind(mode_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Failed to link booking travel mode: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;
        }

        tx.commit().await.map_err(|e| {
            log::error!(
                "Failed to commit booking {}: {}",
                booking.booking_reference,
                e
            );
            TravelError::DatabaseError(e.to_string())
        })?;

        let created = Self::get_by_id(pool, id).await?;
        log::info!(
            "Created booking {} for package {}",
            created.booking_reference,
            created.package_id
        );
        Ok(created)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Booking, TravelError> {
        let sql = format!("SELECT {} FROM bookings WHERE id = $1", BOOKING_COLUMNS);

        sqlx::query_as::<_, Booking>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching booking: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("booking {}", id)))
    }

    pub async fn get_by_reference(pool: &PgPool, reference: &str) -> Result<Booking, TravelError> {
        let sql = format!(
            "SELECT {} FROM bookings WHERE booking_reference = $1",
            BOOKING_COLUMNS
        );

        sqlx::query_as::<_, Booking>(&sql)
            .bind(reference)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching booking '{}': {}", reference, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("booking '{}'", reference)))
    }

    /// True if a reference is already taken (used by reference generation)
    pub async fn reference_exists(pool: &PgPool, reference: &str) -> Result<bool, TravelError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE booking_reference = $1)",
        )
        .bind(reference)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Reference existence check failed: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;
        Ok(row.0)
    }

    /// Admin listing, newest first, optional status filter
    pub async fn list(
        pool: &PgPool,
        query: &BookingQuery,
    ) -> Result<(Vec<Booking>, i64), TravelError> {
        let limit = query.limit.unwrap_or(20).clamp(1, 100);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let mut where_clauses: Vec<String> = Vec::new();

        if let Some(status) = &query.status {
            let escaped = status.replace('\'', "''");
            where_clauses.push(format!("status = '{}'", escaped));
        }

        let where_clause = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM bookings {}", where_clause);
        let count_result: (i64,) = sqlx::query_as(&count_sql)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Booking count query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;

        let sql = format!(
            "SELECT {} FROM bookings {} ORDER BY created_at DESC LIMIT {} OFFSET {}",
            BOOKING_COLUMNS, where_clause, limit, offset
        );

        let bookings = sqlx::query_as::<_, Booking>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Booking list query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;

        Ok((bookings, count_result.0))
    }

    /// Bookings belonging to a registered user, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Booking>, TravelError> {
        let sql = format!(
            "SELECT {} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
            BOOKING_COLUMNS
        );

        sqlx::query_as::<_, Booking>(&sql)
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("User booking list error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: &str,
    ) -> Result<Booking, TravelError> {
        let rows = sqlx::query("UPDATE bookings SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Status update failed for booking {}: {}", id, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("booking {}", id)));
        }

        log::info!("Booking {} status set to {}", id, status);
        Self::get_by_id(pool, id).await
    }

    /// Record that the customer confirmation email went out
    pub async fn mark_confirmation_email_sent(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        sqlx::query(
            "UPDATE bookings SET confirmation_email_sent = true, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to flag confirmation email for booking {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;
        Ok(())
    }

    /// Record that the admin notification email went out
    pub async fn mark_admin_notification_sent(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        sqlx::query(
            "UPDATE bookings SET admin_notification_sent = true, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to flag admin notification for booking {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;
        Ok(())
    }
}
