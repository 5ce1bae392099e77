// src/handlers/admin.rs
// DOCUMENTATION: Admin CMS handlers
// PURPOSE: Authenticated catalog/blog/booking management and service stats

use crate::config::Config;
use crate::db::{
    AccommodationRepository, BlogRepository, BookingRepository, DestinationRepository,
    PackageRepository, QuoteRepository, TravelModeRepository,
};
use crate::errors::TravelError;
use crate::models::{
    BookingQuery, BookingStatus, CreateAccommodationRequest, CreateDestinationRequest,
    CreatePackageRequest, CreatePostRequest, CreateTravelModeRequest, PostStatus, QuoteQuery,
    SetItineraryRequest,
    SetPackageOptionsRequest, UpdateAccommodationRequest, UpdateBookingStatusRequest,
    UpdateDestinationRequest, UpdatePackageRequest, UpdatePostRequest, UpdateTravelModeRequest,
};
use crate::services::catalog_service::{self, slugify};
use crate::services::{mailer, EmailClient};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Authenticate admin request via X-Admin-Token header
fn verify_admin_token(req: &HttpRequest, config: &Config) -> Result<(), TravelError> {
    let token = req
        .headers()
        .get("X-Admin-Token")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            log::warn!("Admin request without token");
            TravelError::Unauthorized
        })?;

    if token != config.admin_token {
        log::warn!("Admin request with invalid token");
        return Err(TravelError::Forbidden);
    }

    Ok(())
}

// --- Destinations ---

/// POST /admin/destinations
pub async fn create_destination(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<CreateDestinationRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    // Hierarchy rule: country has no parent, city under country, place under city
    let parent = match body.parent_id {
        Some(parent_id) => Some(DestinationRepository::get_by_id(pool.get_ref(), parent_id).await?),
        None => None,
    };
    catalog_service::validate_destination_parent(body.destination_type, parent.as_ref())?;

    let slug = slugify(body.slug.as_deref().unwrap_or(&body.name));
    let destination = DestinationRepository::create(pool.get_ref(), &body, &slug).await?;

    Ok(HttpResponse::Created().json(destination.to_response()))
}

/// PUT /admin/destinations/{id}
pub async fn update_destination(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateDestinationRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    let destination =
        DestinationRepository::update(pool.get_ref(), path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(destination.to_response()))
}

/// DELETE /admin/destinations/{id}
pub async fn delete_destination(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    DestinationRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// --- Accommodations ---

/// POST /admin/accommodations
pub async fn create_accommodation(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<CreateAccommodationRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    // The destination must exist
    DestinationRepository::get_by_id(pool.get_ref(), body.destination_id).await?;

    let slug = slugify(body.slug.as_deref().unwrap_or(&body.name));
    let accommodation = AccommodationRepository::create(pool.get_ref(), &body, &slug).await?;

    Ok(HttpResponse::Created().json(accommodation.to_response()))
}

/// PUT /admin/accommodations/{id}
pub async fn update_accommodation(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateAccommodationRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    let accommodation =
        AccommodationRepository::update(pool.get_ref(), path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(accommodation.to_response()))
}

/// DELETE /admin/accommodations/{id}
pub async fn delete_accommodation(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    AccommodationRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// --- Travel modes ---

/// POST /admin/travel-modes
pub async fn create_travel_mode(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<CreateTravelModeRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let mode = TravelModeRepository::create(pool.get_ref(), &body).await?;
    Ok(HttpResponse::Created().json(mode.to_response()))
}

/// PUT /admin/travel-modes/{id}
pub async fn update_travel_mode(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTravelModeRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    let mode = TravelModeRepository::update(pool.get_ref(), path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(mode.to_response()))
}

/// DELETE /admin/travel-modes/{id}
pub async fn delete_travel_mode(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    TravelModeRepository::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// --- Packages ---

/// POST /admin/packages
pub async fn create_package(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<CreatePackageRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    DestinationRepository::get_by_id(pool.get_ref(), body.main_destination_id).await?;

    let slug = slugify(body.slug.as_deref().unwrap_or(&body.name));
    let package = PackageRepository::create(pool.get_ref(), &body, &slug).await?;

    Ok(HttpResponse::Created().json(package.to_response()))
}

/// PUT /admin/packages/{id}
pub async fn update_package(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePackageRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    let package = PackageRepository::update(pool.get_ref(), path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(package.to_response()))
}

/// DELETE /admin/packages/{id}
/// Packages are archived rather than removed
pub async fn delete_package(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    PackageRepository::archive(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /admin/packages/{id}/itinerary
/// Replace the itinerary and its days wholesale
pub async fn set_itinerary(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<SetItineraryRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let package_id = path.into_inner();
    PackageRepository::get_by_id(pool.get_ref(), package_id).await?;
    PackageRepository::set_itinerary(pool.get_ref(), package_id, &body).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "package_id": package_id,
        "days": body.days.len()
    })))
}

/// PUT /admin/packages/{id}/options
/// Set the accommodation and travel-mode join sets
pub async fn set_package_options(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<SetPackageOptionsRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    let package_id = path.into_inner();
    PackageRepository::get_by_id(pool.get_ref(), package_id).await?;

    // Referenced rows must exist and be active
    for id in &body.accommodation_ids {
        AccommodationRepository::get_by_id(pool.get_ref(), *id).await?;
    }
    for id in &body.travel_mode_ids {
        TravelModeRepository::get_by_id(pool.get_ref(), *id).await?;
    }

    PackageRepository::set_options(
        pool.get_ref(),
        package_id,
        &body.accommodation_ids,
        &body.travel_mode_ids,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "package_id": package_id,
        "accommodations": body.accommodation_ids.len(),
        "travel_modes": body.travel_mode_ids.len()
    })))
}

// --- Blog ---

/// Request body for creating a blog category
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// POST /admin/blog/categories
pub async fn create_category(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<CreateCategoryRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let slug = slugify(&body.title);
    let category = BlogRepository::create_category(
        pool.get_ref(),
        &body.title,
        &slug,
        body.description.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Created().json(category))
}

/// POST /admin/blog/posts
/// Slug is derived from the title, suffixed to uniqueness
pub async fn create_post(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    body: web::Json<CreatePostRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let slug = catalog_service::derive_post_slug(pool.get_ref(), &body.title).await?;
    let status = body.status.unwrap_or(PostStatus::InReview);
    let post = BlogRepository::create_post(pool.get_ref(), &body, &slug, status.as_str()).await?;

    Ok(HttpResponse::Created().json(post))
}

/// PUT /admin/blog/posts/{id}
pub async fn update_post(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    let post = BlogRepository::update_post(pool.get_ref(), path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /admin/blog/posts/{id}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    BlogRepository::delete_post(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

// --- Bookings ---

/// GET /admin/bookings
pub async fn list_bookings(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    query: web::Query<BookingQuery>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    if let Some(s) = &query.status {
        BookingStatus::parse(s)
            .ok_or_else(|| TravelError::InvalidInput(format!("unknown booking status '{}'", s)))?;
    }

    let (bookings, total_count) = BookingRepository::list(pool.get_ref(), &query).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "data": bookings.iter().map(|b| b.to_response()).collect::<Vec<_>>(),
        "total_count": total_count,
        "page": query.page.unwrap_or(1).max(1),
        "limit": query.limit.unwrap_or(20).clamp(1, 100)
    })))
}

/// PUT /admin/bookings/{id}/status
/// A transition to confirmed fires a status email to the customer
pub async fn update_booking_status(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    email_client: web::Data<Arc<EmailClient>>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBookingStatusRequest>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    let status = body.status;
    let booking =
        BookingRepository::update_status(pool.get_ref(), path.into_inner(), status.as_str())
            .await?;

    if status.as_str() == "confirmed" {
        mailer::spawn_status_email(
            email_client.get_ref().clone(),
            booking.clone(),
            status.as_str().to_string(),
        );
    }

    Ok(HttpResponse::Ok().json(booking.to_response()))
}

// --- Quotes ---

/// GET /admin/quotes
pub async fn list_quotes(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
    query: web::Query<QuoteQuery>,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    let (quotes, total_count) = QuoteRepository::list(pool.get_ref(), &query).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "data": quotes,
        "total_count": total_count,
        "page": query.page.unwrap_or(1).max(1),
        "limit": query.limit.unwrap_or(20).clamp(1, 100)
    })))
}

// --- Stats ---

/// GET /admin/stats
/// Service-wide totals for the dashboard
pub async fn stats(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<impl Responder, TravelError> {
    verify_admin_token(&req, &config)?;

    #[derive(Debug, serde::Serialize, sqlx::FromRow)]
    struct StatusCount {
        status: String,
        count: Option<i64>,
    }

    let status_counts: Vec<StatusCount> = sqlx::query_as(
        "SELECT status, COUNT(*) as count FROM bookings GROUP BY status ORDER BY count DESC",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

    let revenue: (Option<rust_decimal::Decimal>,) = sqlx::query_as(
        "SELECT SUM(total_amount) FROM bookings WHERE status IN ('confirmed', 'completed')",
    )
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

    let recent_bookings: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM bookings WHERE created_at > NOW() - INTERVAL '24 hours'",
    )
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

    let package_count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM packages WHERE status = 'published'")
            .fetch_one(pool.get_ref())
            .await
            .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

    let destination_count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM destinations WHERE is_active = true")
            .fetch_one(pool.get_ref())
            .await
            .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

    let user_count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM user_accounts WHERE is_active = true")
            .fetch_one(pool.get_ref())
            .await
            .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

    let subscriber_count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM newsletter_subscriptions WHERE is_active = true")
            .fetch_one(pool.get_ref())
            .await
            .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

    #[derive(Debug, serde::Serialize, sqlx::FromRow)]
    struct TopPackage {
        name: String,
        total_bookings: i32,
    }

    let top_packages: Vec<TopPackage> = sqlx::query_as(
        "SELECT name, total_bookings FROM packages
         WHERE status = 'published'
         ORDER BY total_bookings DESC, name LIMIT 5",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| TravelError::DatabaseError(e.to_string()))?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "bookings_by_status": status_counts,
        "revenue": revenue.0.unwrap_or_default(),
        "bookings_last_24h": recent_bookings.0,
        "published_packages": package_count.0,
        "active_destinations": destination_count.0,
        "registered_users": user_count.0,
        "newsletter_subscribers": subscriber_count.0,
        "top_packages": top_packages
    })))
}

/// Configuration for admin routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/destinations", web::post().to(create_destination))
            .route("/destinations/{id}", web::put().to(update_destination))
            .route("/destinations/{id}", web::delete().to(delete_destination))
            .route("/accommodations", web::post().to(create_accommodation))
            .route("/accommodations/{id}", web::put().to(update_accommodation))
            .route("/accommodations/{id}", web::delete().to(delete_accommodation))
            .route("/travel-modes", web::post().to(create_travel_mode))
            .route("/travel-modes/{id}", web::put().to(update_travel_mode))
            .route("/travel-modes/{id}", web::delete().to(delete_travel_mode))
            .route("/packages", web::post().to(create_package))
            .route("/packages/{id}", web::put().to(update_package))
            .route("/packages/{id}", web::delete().to(delete_package))
            .route("/packages/{id}/itinerary", web::put().to(set_itinerary))
            .route("/packages/{id}/options", web::put().to(set_package_options))
            .route("/blog/categories", web::post().to(create_category))
            .route("/blog/posts", web::post().to(create_post))
            .route("/blog/posts/{id}", web::put().to(update_post))
            .route("/blog/posts/{id}", web::delete().to(delete_post))
            .route("/bookings", web::get().to(list_bookings))
            .route("/bookings/{id}/status", web::put().to(update_booking_status))
            .route("/quotes", web::get().to(list_quotes))
            .route("/stats", web::get().to(stats)),
    );
}
