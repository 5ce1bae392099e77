// src/handlers/travel_modes.rs
// DOCUMENTATION: Public travel mode handlers

use crate::db::TravelModeRepository;
use crate::errors::TravelError;
use crate::models::{TransportType, TravelModeQuery};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

/// GET /travel-modes
/// List active travel modes, optionally by transport type
pub async fn list_travel_modes(
    pool: web::Data<PgPool>,
    query: web::Query<TravelModeQuery>,
) -> Result<impl Responder, TravelError> {
    if let Some(t) = &query.type_ {
        TransportType::parse(t)
            .ok_or_else(|| TravelError::InvalidInput(format!("unknown transport type '{}'", t)))?;
    }

    let modes = TravelModeRepository::list(pool.get_ref(), query.type_.as_deref()).await?;
    let responses: Vec<_> = modes.iter().map(|m| m.to_response()).collect();
    Ok(HttpResponse::Ok().json(responses))
}

/// Configuration for travel mode routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/travel-modes").route("", web::get().to(list_travel_modes)));
}
