// src/handlers/packages.rs
// DOCUMENTATION: Public package catalog handlers
// PURPOSE: Paginated search and package detail with itinerary and add-ons

use crate::db::{
    AccommodationRepository, DestinationRepository, PackageRepository, TravelModeRepository,
};
use crate::errors::TravelError;
use crate::models::{
    ItineraryResponse, PackageDetailResponse, PackageQuery, PackageSearchResponse,
};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

/// GET /packages
/// Search published packages with filters and pagination
pub async fn search_packages(
    pool: web::Data<PgPool>,
    query: web::Query<PackageQuery>,
) -> Result<impl Responder, TravelError> {
    let destination_id = match &query.destination {
        Some(slug) => Some(DestinationRepository::get_by_slug(pool.get_ref(), slug).await?.id),
        None => None,
    };

    let (packages, total_count) =
        PackageRepository::search(pool.get_ref(), &query, destination_id).await?;

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let response = PackageSearchResponse {
        data: packages.iter().map(|p| p.to_response()).collect(),
        total_count,
        page,
        limit,
        has_more: page * limit < total_count,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// GET /packages/{slug}
/// Package detail with itinerary days and the offered add-ons
pub async fn get_package(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, TravelError> {
    let package = PackageRepository::get_by_slug(pool.get_ref(), &path.into_inner(), true).await?;

    let itinerary = PackageRepository::get_itinerary(pool.get_ref(), package.id)
        .await?
        .map(|(itinerary, days)| ItineraryResponse {
            title: itinerary.title,
            overview: itinerary.overview,
            days: days.iter().map(|d| d.to_response()).collect(),
        });

    let accommodation_ids = PackageRepository::accommodation_ids(pool.get_ref(), package.id).await?;
    let travel_mode_ids = PackageRepository::travel_mode_ids(pool.get_ref(), package.id).await?;

    let accommodations =
        AccommodationRepository::get_active_by_ids(pool.get_ref(), &accommodation_ids).await?;
    let travel_modes =
        TravelModeRepository::get_active_by_ids(pool.get_ref(), &travel_mode_ids).await?;

    let response = PackageDetailResponse {
        package: package.to_response(),
        itinerary,
        available_accommodations: accommodations.iter().map(|a| a.to_response()).collect(),
        available_travel_modes: travel_modes.iter().map(|m| m.to_response()).collect(),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Configuration for package routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/packages")
            .route("", web::get().to(search_packages))
            .route("/{slug}", web::get().to(get_package)),
    );
}
