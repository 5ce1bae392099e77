// src/services/booking_service.rs
// DOCUMENTATION: Checkout confirmation
// PURPOSE: Turns a ready checkout session into persisted bookings

use crate::db::{
    AccommodationRepository, BookingRepository, PackageRepository, TravelModeRepository,
    UserRepository,
};
use crate::errors::TravelError;
use crate::models::{Booking, NewBooking};
use crate::services::account_service;
use crate::services::cart::{price_item, CartItem};
use crate::services::checkout::CheckoutSession;
use crate::services::mailer::{self, EmailClient};
use rand::Rng;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// One random reference candidate, "TRV" plus 7 digits
pub fn random_reference() -> String {
    let digits: u32 = rand::thread_rng().gen_range(0..10_000_000);
    format!("TRV{:07}", digits)
}

/// Generate a reference not yet present in the bookings table
pub async fn generate_reference(pool: &PgPool) -> Result<String, TravelError> {
    // 10^7 candidates; a handful of retries is plenty
    for _ in 0..20 {
        let candidate = random_reference();
        if !BookingRepository::reference_exists(pool, &candidate).await? {
            return Ok(candidate);
        }
    }

    Err(TravelError::DatabaseError(
        "could not generate a unique booking reference".to_string(),
    ))
}

/// Fold custom accommodation text and the self-drive choice into the
/// free-text requests stored on the booking
pub fn fold_special_requests(base: Option<&str>, item: &CartItem) -> Option<String> {
    let mut lines: Vec<String> = Vec::new();

    if let Some(text) = base {
        if !text.trim().is_empty() {
            lines.push(text.trim().to_string());
        }
    }
    if let Some(custom) = &item.custom_accommodation {
        if !custom.trim().is_empty() {
            lines.push(format!("Custom accommodation: {}", custom.trim()));
        }
    }
    if item.self_drive {
        lines.push("Self-drive: traveler arranges own transport".to_string());
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Find the newest account for an email or create one with a generated
/// password. Creation failure is logged and the booking proceeds as guest.
async fn find_or_create_user(
    pool: &PgPool,
    email_client: &Arc<EmailClient>,
    email: &str,
    full_name: &str,
) -> Option<Uuid> {
    match UserRepository::find_by_email(pool, email).await {
        Ok(Some(account)) => return Some(account.id),
        Ok(None) => {}
        Err(e) => {
            log::warn!("Account lookup for {} failed: {}", email, e);
            return None;
        }
    }

    let username = match account_service::derive_username(pool, email).await {
        Ok(name) => name,
        Err(e) => {
            log::warn!("Username derivation for {} failed: {}", email, e);
            return None;
        }
    };

    let password = account_service::generate_password();
    let (hash, salt) = account_service::hash_password(&password);

    match UserRepository::create_account(pool, &username, email, full_name, &hash, &salt).await {
        Ok(account) => {
            mailer::spawn_welcome_email(
                email_client.clone(),
                email.to_string(),
                full_name.to_string(),
                username,
                password,
            );
            Some(account.id)
        }
        Err(e) => {
            log::warn!("Guest account creation for {} failed: {}", email, e);
            None
        }
    }
}

/// Confirm the checkout: recompute prices from current rows, persist one
/// booking per cart entry and fire the notification emails
pub async fn confirm(
    pool: &PgPool,
    email_client: &Arc<EmailClient>,
    session: &CheckoutSession,
) -> Result<Vec<Booking>, TravelError> {
    let details = session.require_ready()?.clone();

    let user_id = find_or_create_user(pool, email_client, &details.email, &details.full_name).await;

    let mut bookings = Vec::with_capacity(session.cart.items.len());

    for (package_id, item) in &session.cart.items {
        let package = PackageRepository::get_published_by_id(pool, *package_id).await?;

        // Stale add-on references drop out here
        let accommodations =
            AccommodationRepository::get_active_by_ids(pool, &item.accommodation_ids).await?;
        let travel_modes = if item.self_drive {
            Vec::new()
        } else {
            TravelModeRepository::get_active_by_ids(pool, &item.travel_mode_ids).await?
        };

        let pricing = price_item(&package, item, &accommodations, &travel_modes);
        let reference = generate_reference(pool).await?;

        let new_booking = NewBooking {
            booking_reference: reference,
            package_id: package.id,
            user_id,
            full_name: details.full_name.clone(),
            email: details.email.clone(),
            phone_number: details.phone_number.clone(),
            number_of_adults: item.adults,
            number_of_children: item.children,
            number_of_rooms: item.rooms,
            package_price: pricing.package_price,
            accommodation_price: pricing.accommodation_price,
            travel_price: pricing.travel_price,
            total_amount: pricing.total,
            special_requests: fold_special_requests(details.special_requests.as_deref(), item),
            travel_date: details.travel_date,
            accommodation_ids: accommodations.iter().map(|a| a.id).collect(),
            travel_mode_ids: travel_modes.iter().map(|m| m.id).collect(),
        };

        let booking = BookingRepository::create(pool, &new_booking).await?;
        PackageRepository::increment_total_bookings(pool, package.id).await?;

        mailer::spawn_booking_emails(
            email_client.clone(),
            pool.clone(),
            booking.clone(),
            package.name.clone(),
        );

        bookings.push(booking);
    }

    Ok(bookings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_format() {
        for _ in 0..50 {
            let reference = random_reference();
            assert_eq!(reference.len(), 10);
            assert!(reference.starts_with("TRV"));
            assert!(reference[3..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_fold_empty() {
        let item = CartItem::new(2, 0, 1);
        assert_eq!(fold_special_requests(None, &item), None);
        assert_eq!(fold_special_requests(Some("   "), &item), None);
    }

    #[test]
    fn test_fold_custom_accommodation() {
        let mut item = CartItem::new(2, 0, 1);
        item.custom_accommodation = Some("Giraffe Manor".to_string());

        let folded = fold_special_requests(Some("vegetarian meals"), &item);
        assert_eq!(
            folded.as_deref(),
            Some("vegetarian meals\nCustom accommodation: Giraffe Manor")
        );
    }

    #[test]
    fn test_fold_self_drive_note() {
        let mut item = CartItem::new(1, 0, 1);
        item.self_drive = true;

        let folded = fold_special_requests(None, &item);
        assert_eq!(
            folded.as_deref(),
            Some("Self-drive: traveler arranges own transport")
        );
    }
}
