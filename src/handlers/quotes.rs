// src/handlers/quotes.rs
// DOCUMENTATION: Quote request handlers
// PURPOSE: Accept trip enquiries and fire the notification email pair

use crate::db::{PackageRepository, QuoteRepository};
use crate::errors::TravelError;
use crate::models::CreateQuoteRequest;
use crate::services::{mailer, EmailClient};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// POST /quotes
/// A stale package reference does not fail the enquiry, it is just dropped
pub async fn create_quote(
    pool: web::Data<PgPool>,
    email_client: web::Data<Arc<EmailClient>>,
    body: web::Json<CreateQuoteRequest>,
) -> Result<impl Responder, TravelError> {
    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let package_id = match body.package_id {
        Some(id) => match PackageRepository::get_published_by_id(pool.get_ref(), id).await {
            Ok(package) => Some(package.id),
            Err(TravelError::NotFound(_)) => {
                log::warn!("Quote request references unavailable package {}", id);
                None
            }
            Err(e) => return Err(e),
        },
        None => None,
    };

    let quote = QuoteRepository::create(pool.get_ref(), &body, package_id).await?;

    mailer::spawn_quote_emails(
        email_client.get_ref().clone(),
        pool.get_ref().clone(),
        quote.clone(),
    );

    Ok(HttpResponse::Created().json(quote))
}

/// Configuration for quote routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/quotes").route("", web::post().to(create_quote)));
}
