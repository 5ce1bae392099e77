// src/handlers/destinations.rs
// DOCUMENTATION: Public destination catalog handlers
// PURPOSE: Read surface for the country/city/place hierarchy

use crate::db::DestinationRepository;
use crate::errors::TravelError;
use crate::models::{DestinationDetailResponse, DestinationQuery, DestinationType};
use crate::services::catalog_service;
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

/// GET /destinations
/// List active destinations with optional type/parent/featured filters
pub async fn list_destinations(
    pool: web::Data<PgPool>,
    query: web::Query<DestinationQuery>,
) -> Result<impl Responder, TravelError> {
    if let Some(t) = &query.type_ {
        DestinationType::parse(t).ok_or_else(|| {
            TravelError::InvalidInput(format!("unknown destination type '{}'", t))
        })?;
    }

    let parent_id = match &query.parent {
        Some(slug) => Some(DestinationRepository::get_by_slug(pool.get_ref(), slug).await?.id),
        None => None,
    };

    let destinations = DestinationRepository::list(
        pool.get_ref(),
        query.type_.as_deref(),
        parent_id,
        query.featured == Some(true),
    )
    .await?;

    let responses: Vec<_> = destinations.iter().map(|d| d.to_response()).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// GET /destinations/{slug}
/// Destination detail with children and the full ancestor name
pub async fn get_destination(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, TravelError> {
    let slug = path.into_inner();
    let destination = DestinationRepository::get_by_slug(pool.get_ref(), &slug).await?;

    let ancestors = DestinationRepository::ancestors(pool.get_ref(), destination.id).await?;
    let children = DestinationRepository::children(pool.get_ref(), destination.id).await?;

    let response = DestinationDetailResponse {
        full_name: catalog_service::full_name(&ancestors, &destination),
        destination: destination.to_response(),
        children: children.iter().map(|c| c.to_response()).collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Configuration for destination routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/destinations")
            .route("", web::get().to(list_destinations))
            .route("/{slug}", web::get().to(get_destination)),
    );
}
