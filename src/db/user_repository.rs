// src/db/user_repository.rs
// DOCUMENTATION: Database access layer for user accounts, profiles and bucket lists
// PURPOSE: Account creation, credential lookup, profile updates, bucket list CRUD

use crate::db::destination_repository::is_unique_violation;
use crate::errors::TravelError;
use crate::models::{BucketListEntry, UpdateProfileRequest, UserAccount, UserProfile};
use sqlx::PgPool;
use uuid::Uuid;

const ACCOUNT_COLUMNS: &str = r#"
    id, username, email, full_name, password_hash, password_salt,
    is_active, created_at, updated_at
"#;

const PROFILE_COLUMNS: &str = r#"
    id, user_id, phone_number, date_of_birth, nationality, passport_number,
    emergency_contact_name, emergency_contact_phone, preferred_travel_style,
    dietary_requirements, special_needs, email_notifications, marketing_emails,
    created_at, updated_at
"#;

/// UserRepository: all database operations for accounts and bucket lists
pub struct UserRepository;

impl UserRepository {
    /// Insert an account plus its empty profile in one transaction
    pub async fn create_account(
        pool: &PgPool,
        username: &str,
        email: &str,
        full_name: &str,
        password_hash: &str,
        password_salt: &str,
    ) -> Result<UserAccount, TravelError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open transaction: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO user_accounts (
                username, email, full_name, password_hash, password_salt,
                is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, true, NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(full_name)
        .bind(password_hash)
        .bind(password_salt)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return TravelError::AlreadyExists(format!("username '{}'", username));
            }
            log::error!("Failed to create account for {}: {}", email, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, email_notifications, marketing_emails, created_at, updated_at)
            VALUES ($1, true, false, NOW(), NOW())
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Failed to create profile for account {}: {}", id, e);
            TravelError::DatabaseError(e.to_string())
        })?;

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit account creation: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        let account = Self::get_account(pool, id).await?;
        log::info!("Created user account: {} ({})", account.username, account.id);
        Ok(account)
    }

    pub async fn get_account(pool: &PgPool, id: Uuid) -> Result<UserAccount, TravelError> {
        let sql = format!(
            "SELECT {} FROM user_accounts WHERE id = $1 AND is_active = true",
            ACCOUNT_COLUMNS
        );

        sqlx::query_as::<_, UserAccount>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching account: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("account {}", id)))
    }

    /// Most recent active account for an email, if any
    /// Emails are not unique across accounts so the newest wins
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserAccount>, TravelError> {
        let sql = format!(
            "SELECT {} FROM user_accounts
             WHERE email = $1 AND is_active = true
             ORDER BY created_at DESC
             LIMIT 1",
            ACCOUNT_COLUMNS
        );

        sqlx::query_as::<_, UserAccount>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error looking up email: {}", e);
                TravelError::DatabaseError(e.to_string())
            })
    }

    /// Used by username derivation to probe candidate names
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool, TravelError> {
        let row: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM user_accounts WHERE username = $1)")
                .bind(username)
                .fetch_one(pool)
                .await
                .map_err(|e| {
                    log::error!("Username existence check failed: {}", e);
                    TravelError::DatabaseError(e.to_string())
                })?;
        Ok(row.0)
    }

    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<UserProfile, TravelError> {
        let sql = format!("SELECT {} FROM user_profiles WHERE user_id = $1", PROFILE_COLUMNS);

        sqlx::query_as::<_, UserProfile>(&sql)
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                log::error!("Database error fetching profile: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .ok_or_else(|| TravelError::NotFound(format!("profile for user {}", user_id)))
    }

    /// Partial update across the account and profile rows
    pub async fn update_profile(
        pool: &PgPool,
        user_id: Uuid,
        req: &UpdateProfileRequest,
    ) -> Result<(), TravelError> {
        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to open transaction: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        if req.full_name.is_some() {
            sqlx::query(
                "UPDATE user_accounts SET full_name = COALESCE($1, full_name), updated_at = NOW() WHERE id = $2",
            )
            .bind(&req.full_name)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                log::error!("Account update failed for {}: {}", user_id, e);
                TravelError::DatabaseError(e.to_string())
            })?;
        }

        let rows = sqlx::query(
            r#"
            UPDATE user_profiles
            SET phone_number = COALESCE($1, phone_number),
                date_of_birth = COALESCE($2, date_of_birth),
                nationality = COALESCE($3, nationality),
                passport_number = COALESCE($4, passport_number),
                emergency_contact_name = COALESCE($5, emergency_contact_name),
                emergency_contact_phone = COALESCE($6, emergency_contact_phone),
                preferred_travel_style = COALESCE($7, preferred_travel_style),
                dietary_requirements = COALESCE($8, dietary_requirements),
                special_needs = COALESCE($9, special_needs),
                email_notifications = COALESCE($10, email_notifications),
                marketing_emails = COALESCE($11, marketing_emails),
                updated_at = NOW()
            WHERE user_id = $12
            "#,
        )
        .bind(&req.phone_number)
        .bind(req.date_of_birth)
        .bind(&req.nationality)
        .bind(&req.passport_number)
        .bind(&req.emergency_contact_name)
        .bind(&req.emergency_contact_phone)
        .bind(&req.preferred_travel_style)
        .bind(&req.dietary_requirements)
        .bind(&req.special_needs)
        .bind(req.email_notifications)
        .bind(req.marketing_emails)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            log::error!("Profile update failed for {}: {}", user_id, e);
            TravelError::DatabaseError(e.to_string())
        })?
        .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("profile for user {}", user_id)));
        }

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit profile update: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    /// Add a bucket list entry; one row per (user, item)
    pub async fn add_bucket_item(
        pool: &PgPool,
        user_id: Uuid,
        item_type: &str,
        package_id: Option<Uuid>,
        accommodation_id: Option<Uuid>,
        destination_id: Option<Uuid>,
        notes: Option<&str>,
        priority: &str,
    ) -> Result<BucketListEntry, TravelError> {
        let entry = sqlx::query_as::<_, BucketListEntry>(
            r#"
            INSERT INTO bucket_list (
                user_id, item_type, package_id, accommodation_id, destination_id,
                notes, priority, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            RETURNING id, user_id, item_type, package_id, accommodation_id,
                      destination_id, notes, priority, created_at
            "#,
        )
        .bind(user_id)
        .bind(item_type)
        .bind(package_id)
        .bind(accommodation_id)
        .bind(destination_id)
        .bind(notes)
        .bind(priority)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return TravelError::AlreadyExists("item already on bucket list".to_string());
            }
            log::error!("Failed to add bucket list item: {}", e);
            TravelError::DatabaseError(e.to_string())
        })?;

        Ok(entry)
    }

    pub async fn list_bucket_items(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<BucketListEntry>, TravelError> {
        sqlx::query_as::<_, BucketListEntry>(
            r#"
            SELECT id, user_id, item_type, package_id, accommodation_id,
                   destination_id, notes, priority, created_at
            FROM bucket_list
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Bucket list query error: {}", e);
            TravelError::DatabaseError(e.to_string())
        })
    }

    /// Remove an entry; scoped to the owning user
    pub async fn remove_bucket_item(
        pool: &PgPool,
        user_id: Uuid,
        entry_id: Uuid,
    ) -> Result<(), TravelError> {
        let rows = sqlx::query("DELETE FROM bucket_list WHERE id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to remove bucket list item: {}", e);
                TravelError::DatabaseError(e.to_string())
            })?
            .rows_affected();

        if rows == 0 {
            return Err(TravelError::NotFound(format!("bucket list entry {}", entry_id)));
        }

        Ok(())
    }
}
