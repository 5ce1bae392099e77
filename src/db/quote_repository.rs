// src/db/quote_repository.rs
// DOCUMENTATION: Database access layer for quote requests
// PURPOSE: Persist enquiries and track their notification emails

use crate::errors::TravelError;
use crate::models::{CreateQuoteRequest, QuoteQuery, QuoteRequest};
use sqlx::PgPool;
use uuid::Uuid;

const QUOTE_COLUMNS: &str = r#"
    id, full_name, email, phone_number,
    destination, preferred_travel_dates, number_of_travelers,
    special_requests, package_id,
    confirmation_email_sent, admin_notification_sent, created_at
"#;

/// QuoteRepository: all database operations for quote requests
pub struct QuoteRepository;

impl QuoteRepository {
    pub async fn create(
        pool: &PgPool,
        req: &CreateQuoteRequest,
        package_id: Option<Uuid>,
    ) -> Result<QuoteRequest, TravelError> {
        let sql = format!(
            r#"
            INSERT INTO quote_requests (
                full_name, email, phone_number,
                destination, preferred_travel_dates, number_of_travelers,
                special_requests, package_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            QUOTE_COLUMNS
        );

        let quote = sqlx::query_as::<_, QuoteRequest>(&sql)
            .bind(&req.full_name)
            .bind(&req.email)
            .bind(&req.phone_number)
            .bind(&req.destination)
            .bind(&req.preferred_travel_dates)
            .bind(req.number_of_travelers)
            .bind(&req.special_requests)
            .bind(package_id)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to create quote request for {}: {}", req.email, e);
                TravelError::DatabaseError(e.to_string())
            })?;

        log::info!("Quote request created: {} ({})", quote.id, quote.full_name);
        Ok(quote)
    }

    /// Paginated listing for the admin surface, newest first
    pub async fn list(
        pool: &PgPool,
        query: &QuoteQuery,
    ) -> Result<(Vec<QuoteRequest>, i64), TravelError> {
        let limit = query.limit.unwrap_or(20).clamp(1, 100);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1) * limit;

        let count_result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM quote_requests")
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Quote count query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;

        let sql = format!(
            "SELECT {} FROM quote_requests ORDER BY created_at DESC LIMIT {} OFFSET {}",
            QUOTE_COLUMNS, limit, offset
        );

        let quotes = sqlx::query_as::<_, QuoteRequest>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Quote list query error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?;

        Ok((quotes, count_result.0))
    }

    pub async fn mark_confirmation_email_sent(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        sqlx::query("UPDATE quote_requests SET confirmation_email_sent = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to flag confirmation email for quote {}: {}", id, e);
                TravelError::DatabaseError(e.to_string())
            })?;
        Ok(())
    }

    pub async fn mark_admin_notification_sent(pool: &PgPool, id: Uuid) -> Result<(), TravelError> {
        sqlx::query("UPDATE quote_requests SET admin_notification_sent = true WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to flag admin notification for quote {}: {}", id, e);
                TravelError::DatabaseError(e.to_string())
            })?;
        Ok(())
    }
}
