// src/handlers/accounts.rs
// DOCUMENTATION: Account registration, login, profile and bucket list handlers
// PURPOSE: Registered-customer surface, authenticated via X-Auth-Token

use crate::db::{
    AccommodationRepository, BookingRepository, DestinationRepository, PackageRepository,
    UserRepository,
};
use crate::errors::TravelError;
use crate::models::{
    AddBucketItemRequest, AuthResponse, BucketItemResponse, BucketItemType, BucketListEntry,
    LoginRequest, RegisterRequest, UpdateProfileRequest, TRAVEL_STYLES,
};
use crate::services::{account_service, SessionStore};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Shared store mapping auth tokens to user ids
pub type AuthStore = Arc<SessionStore<Uuid>>;

/// Resolve the authenticated user from X-Auth-Token
async fn authenticate(req: &HttpRequest, store: &AuthStore) -> Result<Uuid, TravelError> {
    let token = req
        .headers()
        .get("X-Auth-Token")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| {
            log::warn!("Account request without auth token");
            TravelError::Unauthorized
        })?;

    store.get(&token).await.ok_or(TravelError::Unauthorized)
}

/// POST /accounts/register
pub async fn register(
    pool: web::Data<PgPool>,
    store: web::Data<AuthStore>,
    body: web::Json<RegisterRequest>,
) -> Result<impl Responder, TravelError> {
    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let email = body.email.to_lowercase();

    if UserRepository::find_by_email(pool.get_ref(), &email)
        .await?
        .is_some()
    {
        return Err(TravelError::AlreadyExists(format!(
            "account for {}",
            email
        )));
    }

    let username = match &body.username {
        Some(name) if !name.trim().is_empty() => {
            let name = name.trim().to_string();
            if UserRepository::username_exists(pool.get_ref(), &name).await? {
                return Err(TravelError::AlreadyExists(format!("username '{}'", name)));
            }
            name
        }
        _ => account_service::derive_username(pool.get_ref(), &email).await?,
    };

    let (hash, salt) = account_service::hash_password(&body.password);
    let account = UserRepository::create_account(
        pool.get_ref(),
        &username,
        &email,
        &body.full_name,
        &hash,
        &salt,
    )
    .await?;

    let token = store.create(account.id).await;

    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user_id: account.id,
        username: account.username,
        email: account.email,
    }))
}

/// POST /accounts/login
pub async fn login(
    pool: web::Data<PgPool>,
    store: web::Data<AuthStore>,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, TravelError> {
    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let email = body.email.to_lowercase();
    let account = UserRepository::find_by_email(pool.get_ref(), &email)
        .await?
        .ok_or(TravelError::Unauthorized)?;

    if !account_service::verify_password(&body.password, &account.password_hash, &account.password_salt)
    {
        log::warn!("Failed login attempt for {}", email);
        return Err(TravelError::Unauthorized);
    }

    let token = store.create(account.id).await;
    log::info!("User {} logged in", account.username);

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user_id: account.id,
        username: account.username,
        email: account.email,
    }))
}

/// GET /accounts/profile
pub async fn get_profile(
    pool: web::Data<PgPool>,
    store: web::Data<AuthStore>,
    req: HttpRequest,
) -> Result<impl Responder, TravelError> {
    let user_id = authenticate(&req, &store).await?;

    let account = UserRepository::get_account(pool.get_ref(), user_id).await?;
    let profile = UserRepository::get_profile(pool.get_ref(), user_id).await?;

    Ok(HttpResponse::Ok().json(account.to_profile_response(&profile)))
}

/// PUT /accounts/profile
pub async fn update_profile(
    pool: web::Data<PgPool>,
    store: web::Data<AuthStore>,
    req: HttpRequest,
    body: web::Json<UpdateProfileRequest>,
) -> Result<impl Responder, TravelError> {
    let user_id = authenticate(&req, &store).await?;

    if let Some(style) = &body.preferred_travel_style {
        if !TRAVEL_STYLES.contains(&style.as_str()) {
            return Err(TravelError::InvalidInput(format!(
                "unknown travel style '{}'",
                style
            )));
        }
    }

    UserRepository::update_profile(pool.get_ref(), user_id, &body).await?;

    let account = UserRepository::get_account(pool.get_ref(), user_id).await?;
    let profile = UserRepository::get_profile(pool.get_ref(), user_id).await?;

    Ok(HttpResponse::Ok().json(account.to_profile_response(&profile)))
}

/// GET /accounts/bookings
pub async fn list_bookings(
    pool: web::Data<PgPool>,
    store: web::Data<AuthStore>,
    req: HttpRequest,
) -> Result<impl Responder, TravelError> {
    let user_id = authenticate(&req, &store).await?;

    let bookings = BookingRepository::list_for_user(pool.get_ref(), user_id).await?;
    let responses: Vec<_> = bookings.iter().map(|b| b.to_response()).collect();

    Ok(HttpResponse::Ok().json(responses))
}

/// Resolve the referenced item's name and image for the response
async fn bucket_item_view(
    pool: &PgPool,
    entry: &BucketListEntry,
) -> Result<BucketItemResponse, TravelError> {
    let (item_id, item_name, item_image_url) = if let Some(id) = entry.package_id {
        let package = PackageRepository::get_by_id(pool, id).await?;
        (id, package.name, package.featured_image_url)
    } else if let Some(id) = entry.accommodation_id {
        let accommodation = AccommodationRepository::get_by_id(pool, id).await?;
        (id, accommodation.name, accommodation.image_url)
    } else if let Some(id) = entry.destination_id {
        let destination = DestinationRepository::get_by_id(pool, id).await?;
        (id, destination.name, destination.image_url)
    } else {
        return Err(TravelError::DatabaseError(format!(
            "bucket list entry {} references no item",
            entry.id
        )));
    };

    Ok(BucketItemResponse {
        id: entry.id,
        item_type: entry.item_type.clone(),
        item_id,
        item_name,
        item_image_url,
        notes: entry.notes.clone(),
        priority: entry.priority.clone(),
        created_at: entry.created_at,
    })
}

/// GET /accounts/bucket-list
pub async fn list_bucket(
    pool: web::Data<PgPool>,
    store: web::Data<AuthStore>,
    req: HttpRequest,
) -> Result<impl Responder, TravelError> {
    let user_id = authenticate(&req, &store).await?;

    let entries = UserRepository::list_bucket_items(pool.get_ref(), user_id).await?;

    let mut responses = Vec::with_capacity(entries.len());
    for entry in &entries {
        responses.push(bucket_item_view(pool.get_ref(), entry).await?);
    }

    Ok(HttpResponse::Ok().json(responses))
}

/// POST /accounts/bucket-list
pub async fn add_bucket_item(
    pool: web::Data<PgPool>,
    store: web::Data<AuthStore>,
    req: HttpRequest,
    body: web::Json<AddBucketItemRequest>,
) -> Result<impl Responder, TravelError> {
    let user_id = authenticate(&req, &store).await?;

    if !["high", "medium", "low"].contains(&body.priority.as_str()) {
        return Err(TravelError::InvalidInput(format!(
            "unknown priority '{}'",
            body.priority
        )));
    }

    // The referenced row must exist; this also yields a clean 404
    let (package_id, accommodation_id, destination_id) = match body.item_type {
        BucketItemType::Package => {
            PackageRepository::get_by_id(pool.get_ref(), body.item_id).await?;
            (Some(body.item_id), None, None)
        }
        BucketItemType::Accommodation => {
            AccommodationRepository::get_by_id(pool.get_ref(), body.item_id).await?;
            (None, Some(body.item_id), None)
        }
        BucketItemType::Destination => {
            DestinationRepository::get_by_id(pool.get_ref(), body.item_id).await?;
            (None, None, Some(body.item_id))
        }
    };

    let entry = UserRepository::add_bucket_item(
        pool.get_ref(),
        user_id,
        body.item_type.as_str(),
        package_id,
        accommodation_id,
        destination_id,
        body.notes.as_deref(),
        &body.priority,
    )
    .await?;

    let response = bucket_item_view(pool.get_ref(), &entry).await?;
    Ok(HttpResponse::Created().json(response))
}

/// DELETE /accounts/bucket-list/{id}
pub async fn remove_bucket_item(
    pool: web::Data<PgPool>,
    store: web::Data<AuthStore>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let user_id = authenticate(&req, &store).await?;

    UserRepository::remove_bucket_item(pool.get_ref(), user_id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configuration for account routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/accounts")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/profile", web::get().to(get_profile))
            .route("/profile", web::put().to(update_profile))
            .route("/bookings", web::get().to(list_bookings))
            .route("/bucket-list", web::get().to(list_bucket))
            .route("/bucket-list", web::post().to(add_bucket_item))
            .route("/bucket-list/{id}", web::delete().to(remove_bucket_item)),
    );
}
