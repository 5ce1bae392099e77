// src/db/newsletter_repository.rs
// DOCUMENTATION: Database access layer for newsletter subscriptions
// PURPOSE: Subscribe/reactivate, token-based confirm and unsubscribe

use crate::errors::TravelError;
use crate::models::NewsletterSubscription;
use sqlx::PgPool;

const SUBSCRIPTION_COLUMNS: &str = r#"
    id, email, is_active, is_confirmed,
    travel_tips, special_offers, destination_updates,
    subscription_date, confirmation_date, unsubscribe_token,
    confirmation_email_sent, admin_notification_sent
"#;

/// NewsletterRepository: all database operations for subscriptions
pub struct NewsletterRepository;

impl NewsletterRepository {
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<NewsletterSubscription>, TravelError> {
        let sql = format!(
            "SELECT {} FROM newsletter_subscriptions WHERE email = $1",
            SUBSCRIPTION_COLUMNS
        );

        sqlx::query_as::<_, NewsletterSubscription>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Subscription lookup error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// Create a fresh unconfirmed subscription
    pub async fn create(
        pool: &PgPool,
        email: &str,
        token: &str,
        travel_tips: bool,
        special_offers: bool,
        destination_updates: bool,
    ) -> Result<NewsletterSubscription, TravelError> {
        let sql = format!(
            r#"
            INSERT INTO newsletter_subscriptions (
                email, is_active, is_confirmed,
                travel_tips, special_offers, destination_updates,
                subscription_date, unsubscribe_token,
                confirmation_email_sent, admin_notification_sent
            )
            VALUES ($1, true, false, $2, $3, $4, NOW(), $5, false, false)
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        );

        let sub = sqlx::query_as::<_, NewsletterSubscription>(&sql)
            .bind(email)
            .bind(travel_tips)
            .bind(special_offers)
            .bind(destination_updates)
            .bind(token)
            .fetch_one(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to create subscription for {}: {}", email, e);
                TravelError::DatabaseError(e.to_string())
            })?;

        log::info!("Newsletter subscription created: {}", email);
        Ok(sub)
    }

    /// Re-activate an unsubscribed address, refreshing preferences and token
    pub async fn reactivate(
        pool: &PgPool,
        email: &str,
        token: &str,
        travel_tips: bool,
        special_offers: bool,
        destination_updates: bool,
    ) -> Result<NewsletterSubscription, TravelError> {
        let sql = format!(
            r#"
            UPDATE newsletter_subscriptions
            SET is_active = true,
                travel_tips = $2,
                special_offers = $3,
                destination_updates = $4,
                subscription_date = NOW(),
                unsubscribe_token = $5,
                confirmation_email_sent = false
            WHERE email = $1
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        );

        sqlx::query_as::<_, NewsletterSubscription>(&sql)
            .bind(email)
            .bind(travel_tips)
            .bind(special_offers)
            .bind(destination_updates)
            .bind(token)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to reactivate subscription for {}: {}", email, e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("subscription for {}", email)))
    }

    /// Mark a subscription confirmed via its emailed token
    pub async fn confirm(pool: &PgPool, token: &str) -> Result<NewsletterSubscription, TravelError> {
        let sql = format!(
            r#"
            UPDATE newsletter_subscriptions
            SET is_confirmed = true,
                confirmation_date = COALESCE(confirmation_date, NOW())
            WHERE unsubscribe_token = $1 AND is_active = true
            RETURNING {}
            "#,
            SUBSCRIPTION_COLUMNS
        );

        sqlx::query_as::<_, NewsletterSubscription>(&sql)
            .bind(token)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Subscription confirm error: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound("subscription".to_string()))
    }

    /// Deactivate via the emailed token; row is kept for re-subscribe
    pub async fn unsubscribe(pool: &PgPool, token: &str) -> Result<(), TravelError> {
        let rows = sqlx::query(
            "UPDATE newsletter_subscriptions SET is_active = false WHERE unsubscribe_token = $1",
        )
        .bind(token)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Unsubscribe error: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound("subscription".to_string()));
        }

        log::info!("Newsletter unsubscribe processed");
        Ok(())
    }

    pub async fn mark_confirmation_email_sent(pool: &PgPool, email: &str) -> Result<(), TravelError> {
        sqlx::query(
            "UPDATE newsletter_subscriptions SET confirmation_email_sent = true WHERE email = $1",
        )
        .bind(email)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to flag confirmation email for {}: {}", email, e);
            TravelError::DatabaseError(e.to_string())
        })?;
        Ok(())
    }

    pub async fn mark_admin_notification_sent(pool: &PgPool, email: &str) -> Result<(), TravelError> {
        sqlx::query(
            "UPDATE newsletter_subscriptions SET admin_notification_sent = true WHERE email = $1",
        )
        .bind(email)
        .execute(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to flag admin notification for {}: {}", email, e);
            TravelError::DatabaseError(e.to_string())
        })?;
        Ok(())
    }
}
