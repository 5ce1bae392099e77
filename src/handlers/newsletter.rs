// src/handlers/newsletter.rs
// DOCUMENTATION: Newsletter subscription handlers
// PURPOSE: Subscribe, token-based confirm and unsubscribe

use crate::db::NewsletterRepository;
use crate::errors::TravelError;
use crate::models::SubscribeRequest;
use crate::services::{account_service, mailer, EmailClient};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;
use std::sync::Arc;
use validator::Validate;

/// POST /newsletter/subscribe
/// New addresses subscribe; unsubscribed ones reactivate
pub async fn subscribe(
    pool: web::Data<PgPool>,
    email_client: web::Data<Arc<EmailClient>>,
    body: web::Json<SubscribeRequest>,
) -> Result<impl Responder, TravelError> {
    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let email = body.email.to_lowercase();
    let existing = NewsletterRepository::find_by_email(pool.get_ref(), &email).await?;

    let subscription = match existing {
        Some(sub) if sub.is_active => {
            return Err(TravelError::AlreadyExists(format!(
                "subscription for {}",
                email
            )));
        }
        Some(_) => {
            let token = account_service::generate_token();
            NewsletterRepository::reactivate(
                pool.get_ref(),
                &email,
                &token,
                body.travel_tips,
                body.special_offers,
                body.destination_updates,
            )
            .await?
        }
        None => {
            let token = account_service::generate_token();
            NewsletterRepository::create(
                pool.get_ref(),
                &email,
                &token,
                body.travel_tips,
                body.special_offers,
                body.destination_updates,
            )
            .await?
        }
    };

    mailer::spawn_newsletter_emails(
        email_client.get_ref().clone(),
        pool.get_ref().clone(),
        subscription.email.clone(),
        subscription.unsubscribe_token.clone(),
    );

    Ok(HttpResponse::Created().json(subscription.to_response()))
}

/// GET /newsletter/confirm/{token}
pub async fn confirm(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, TravelError> {
    let subscription = NewsletterRepository::confirm(pool.get_ref(), &path.into_inner()).await?;
    log::info!("Newsletter subscription confirmed: {}", subscription.email);
    Ok(HttpResponse::Ok().json(subscription.to_response()))
}

/// GET /newsletter/unsubscribe/{token}
pub async fn unsubscribe(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> Result<impl Responder, TravelError> {
    NewsletterRepository::unsubscribe(pool.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "unsubscribed" })))
}

/// Configuration for newsletter routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/newsletter")
            .route("/subscribe", web::post().to(subscribe))
            .route("/confirm/{token}", web::get().to(confirm))
            .route("/unsubscribe/{token}", web::get().to(unsubscribe)),
    );
}
