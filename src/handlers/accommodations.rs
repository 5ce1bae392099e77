// src/handlers/accommodations.rs
// DOCUMENTATION: Public accommodation catalog handlers

use crate::db::{AccommodationRepository, DestinationRepository};
use crate::errors::TravelError;
use crate::models::{AccommodationQuery, AccommodationType};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

/// GET /accommodations
/// List active accommodations with optional destination/type/featured filters
pub async fn list_accommodations(
    pool: web::Data<PgPool>,
    query: web::Query<AccommodationQuery>,
) -> Result<impl Responder, TravelError> {
    if let Some(t) = &query.type_ {
        AccommodationType::parse(t).ok_or_else(|| {
            TravelError::InvalidInput(format!("unknown accommodation type '{}'", t))
        })?;
    }

    let destination_id = match &query.destination {
        Some(slug) => Some(DestinationRepository::get_by_slug(pool.get_ref(), slug).await?.id),
        None => None,
    };

    let accommodations = AccommodationRepository::list(
        pool.get_ref(),
        destination_id,
        query.type_.as_deref(),
        query.featured == Some(true),
    )
    .await?;

    let responses: Vec<_> = accommodations.iter().map(|a| a.to_response()).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// GET /accommodations/{slug}
pub async fn get_accommodation(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, TravelError> {
    let accommodation =
        AccommodationRepository::get_by_slug(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(accommodation.to_response()))
}

/// Configuration for accommodation routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/accommodations")
            .route("", web::get().to(list_accommodations))
            .route("/{slug}", web::get().to(get_accommodation)),
    );
}
