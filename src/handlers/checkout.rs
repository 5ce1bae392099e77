// src/handlers/checkout.rs
// DOCUMENTATION: Session cart and multi-step checkout handlers
// PURPOSE: Cart maintenance, customization, details, summary and confirmation

use crate::db::{
    AccommodationRepository, BookingRepository, PackageRepository, TravelModeRepository,
};
use crate::errors::TravelError;
use crate::models::BookingConfirmationResponse;
use crate::services::booking_service;
use crate::services::cart::price_item;
use crate::services::checkout::{
    AddToCartRequest, CartItemView, CartResponse, CheckoutDetails, CheckoutDetailsRequest,
    CheckoutSession, CustomizeRequest, PriceBreakdown, SummaryResponse,
};
use crate::services::{EmailClient, SessionStore};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Shared store holding checkout sessions
pub type CheckoutStore = Arc<SessionStore<CheckoutSession>>;

/// Resolve the session from X-Session-Token, creating one when the header
/// is missing or the token is unknown/expired
async fn resolve_session(
    req: &HttpRequest,
    store: &CheckoutStore,
) -> (Uuid, CheckoutSession) {
    let token = req
        .headers()
        .get("X-Session-Token")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok());

    if let Some(token) = token {
        if let Some(session) = store.get(&token).await {
            return (token, session);
        }
    }

    let session = CheckoutSession::default();
    let token = store.create(session.clone()).await;
    (token, session)
}

/// Session lookup for steps that must not silently start over
async fn require_session(
    req: &HttpRequest,
    store: &CheckoutStore,
) -> Result<(Uuid, CheckoutSession), TravelError> {
    let token = req
        .headers()
        .get("X-Session-Token")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| {
            TravelError::CheckoutIncomplete("no checkout session; add a package first".to_string())
        })?;

    let session = store.get(&token).await.ok_or_else(|| {
        TravelError::CheckoutIncomplete("checkout session expired; start over".to_string())
    })?;

    Ok((token, session))
}

/// Render the cart with current catalog rows and prices
async fn cart_view(
    pool: &PgPool,
    session: &CheckoutSession,
    token: Uuid,
) -> Result<CartResponse, TravelError> {
    let mut items = Vec::with_capacity(session.cart.items.len());

    for (package_id, item) in &session.cart.items {
        let package = PackageRepository::get_by_id(pool, *package_id).await?;
        let accommodations =
            AccommodationRepository::get_active_by_ids(pool, &item.accommodation_ids).await?;
        let travel_modes =
            TravelModeRepository::get_active_by_ids(pool, &item.travel_mode_ids).await?;

        let pricing = price_item(&package, item, &accommodations, &travel_modes);

        items.push(CartItemView {
            package: package.to_response(),
            adults: item.adults,
            children: item.children,
            rooms: item.rooms,
            accommodation_ids: item.accommodation_ids.clone(),
            travel_mode_ids: item.travel_mode_ids.clone(),
            custom_accommodation: item.custom_accommodation.clone(),
            self_drive: item.self_drive,
            pricing,
        });
    }

    Ok(CartResponse {
        session_token: token,
        items,
        traveler_count: session.cart.len(),
    })
}

fn with_token(token: Uuid, body: impl serde::Serialize) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header(("X-Session-Token", token.to_string()))
        .json(body)
}

/// POST /checkout/cart/{package_id}
/// Package selection step: put a published package in the cart
pub async fn add_to_cart(
    pool: web::Data<PgPool>,
    store: web::Data<CheckoutStore>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<AddToCartRequest>,
) -> Result<impl Responder, TravelError> {
    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let package_id = path.into_inner();
    let package = PackageRepository::get_published_by_id(pool.get_ref(), package_id).await?;

    let (token, mut session) = resolve_session(&req, &store).await;
    session.cart.add_package(
        package.id,
        body.adults,
        body.children,
        body.rooms,
        body.override_counts,
    );
    store.set(token, session.clone()).await;

    log::info!("Package {} added to cart for session {}", package.id, token);

    let view = cart_view(pool.get_ref(), &session, token).await?;
    Ok(with_token(token, view))
}

/// PUT /checkout/cart/{package_id}
/// Replace the traveler counts for an existing entry
pub async fn update_cart_item(
    pool: web::Data<PgPool>,
    store: web::Data<CheckoutStore>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<AddToCartRequest>,
) -> Result<impl Responder, TravelError> {
    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }

    let package_id = path.into_inner();
    let (token, mut session) = require_session(&req, &store).await?;

    if session.cart.get(&package_id).is_none() {
        return Err(TravelError::NotFound(format!(
            "package {} is not in the cart",
            package_id
        )));
    }

    session
        .cart
        .add_package(package_id, body.adults, body.children, body.rooms, true);
    store.set(token, session.clone()).await;

    let view = cart_view(pool.get_ref(), &session, token).await?;
    Ok(with_token(token, view))
}

/// DELETE /checkout/cart/{package_id}
/// Remove an entry; details are dropped once the cart empties
pub async fn remove_cart_item(
    pool: web::Data<PgPool>,
    store: web::Data<CheckoutStore>,
    req: HttpRequest,
    path: web::Path<Uuid>,
) -> Result<impl Responder, TravelError> {
    let package_id = path.into_inner();
    let (token, mut session) = require_session(&req, &store).await?;

    if !session.cart.remove_package(&package_id) {
        return Err(TravelError::NotFound(format!(
            "package {} is not in the cart",
            package_id
        )));
    }
    if session.cart.is_empty() {
        session.details = None;
    }
    store.set(token, session.clone()).await;

    let view = cart_view(pool.get_ref(), &session, token).await?;
    Ok(with_token(token, view))
}

/// POST /checkout/customize/{package_id}
/// Customization step: replace add-on selections for a cart entry
pub async fn customize(
    pool: web::Data<PgPool>,
    store: web::Data<CheckoutStore>,
    req: HttpRequest,
    path: web::Path<Uuid>,
    body: web::Json<CustomizeRequest>,
) -> Result<impl Responder, TravelError> {
    let package_id = path.into_inner();

    // The entry is auto-added with defaults, so the package must exist
    PackageRepository::get_published_by_id(pool.get_ref(), package_id).await?;

    let (token, mut session) = resolve_session(&req, &store).await;
    let body = body.into_inner();

    let item = session.cart.entry(package_id);
    item.accommodation_ids = body.accommodation_ids;
    item.travel_mode_ids = body.travel_mode_ids;
    item.custom_accommodation = body
        .custom_accommodation
        .filter(|text| !text.trim().is_empty());
    item.self_drive = body.self_drive;

    store.set(token, session.clone()).await;

    let view = cart_view(pool.get_ref(), &session, token).await?;
    Ok(with_token(token, view))
}

/// POST /checkout/details
/// Details step: capture traveler contact information
pub async fn save_details(
    store: web::Data<CheckoutStore>,
    req: HttpRequest,
    body: web::Json<CheckoutDetailsRequest>,
) -> Result<impl Responder, TravelError> {
    if let Err(e) = body.validate() {
        return Err(TravelError::ValidationError(e.to_string()));
    }
    if !body.terms_accepted {
        return Err(TravelError::ValidationError(
            "terms and conditions must be accepted".to_string(),
        ));
    }

    let (token, mut session) = require_session(&req, &store).await?;

    if session.cart.is_empty() {
        return Err(TravelError::CheckoutIncomplete(
            "cart is empty; select a package first".to_string(),
        ));
    }

    let body = body.into_inner();
    session.details = Some(CheckoutDetails {
        full_name: body.full_name,
        email: body.email.to_lowercase(),
        phone_number: body.phone_number,
        special_requests: body.special_requests,
        travel_date: body.travel_date,
        marketing_consent: body.marketing_consent,
    });
    store.set(token, session).await;

    Ok(with_token(
        token,
        serde_json::json!({ "session_token": token, "status": "details_saved" }),
    ))
}

/// GET /checkout/summary
/// Summary step: cart items with prices, details and the grand total
pub async fn summary(
    pool: web::Data<PgPool>,
    store: web::Data<CheckoutStore>,
    req: HttpRequest,
) -> Result<impl Responder, TravelError> {
    let (token, session) = require_session(&req, &store).await?;
    let details = session.require_ready()?.clone();

    let view = cart_view(pool.get_ref(), &session, token).await?;
    let pricings: Vec<_> = view.items.iter().map(|i| i.pricing.clone()).collect();

    let response = SummaryResponse {
        session_token: token,
        breakdown: PriceBreakdown::from_items(&pricings),
        items: view.items,
        details,
    };

    Ok(with_token(token, response))
}

/// POST /checkout/confirm
/// Confirmation step: persist bookings and clear the session
pub async fn confirm(
    pool: web::Data<PgPool>,
    store: web::Data<CheckoutStore>,
    email_client: web::Data<Arc<EmailClient>>,
    req: HttpRequest,
) -> Result<impl Responder, TravelError> {
    let (token, session) = require_session(&req, &store).await?;

    let bookings =
        booking_service::confirm(pool.get_ref(), email_client.get_ref(), &session).await?;

    // Checkout is done; the session starts fresh
    store.set(token, CheckoutSession::default()).await;

    let responses: Vec<_> = bookings.iter().map(|b| b.to_response()).collect();
    Ok(HttpResponse::Created()
        .insert_header(("X-Session-Token", token.to_string()))
        .json(responses))
}

/// GET /bookings/{reference}
/// Confirmation view looked up by booking reference
pub async fn get_booking(
    pool: web::Data<PgPool>,
    email_client: web::Data<Arc<EmailClient>>,
    path: web::Path<String>,
) -> Result<impl Responder, TravelError> {
    let booking = BookingRepository::get_by_reference(pool.get_ref(), &path.into_inner()).await?;
    let package = PackageRepository::get_by_id(pool.get_ref(), booking.package_id).await?;

    let response = BookingConfirmationResponse {
        whatsapp_link: email_client.whatsapp_link(&booking.booking_reference),
        booking: booking.to_response(),
        package_name: package.name,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Configuration for checkout and booking-lookup routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/checkout")
            .route("/cart/{package_id}", web::post().to(add_to_cart))
            .route("/cart/{package_id}", web::put().to(update_cart_item))
            .route("/cart/{package_id}", web::delete().to(remove_cart_item))
            .route("/customize/{package_id}", web::post().to(customize))
            .route("/details", web::post().to(save_details))
            .route("/summary", web::get().to(summary))
            .route("/confirm", web::post().to(confirm)),
    );
    cfg.route("/bookings/{reference}", web::get().to(get_booking));
}
