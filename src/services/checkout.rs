// src/services/checkout.rs
// DOCUMENTATION: Checkout session state and step validation
// PURPOSE: Carries the cart and traveler details through the checkout ladder

use crate::errors::TravelError;
use crate::models::PackageResponse;
use crate::services::cart::{Cart, ItemPricing};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Traveler details captured at the details step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutDetails {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub special_requests: Option<String>,
    pub travel_date: Option<NaiveDate>,
    pub marketing_consent: bool,
}

/// Everything a checkout session holds between requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub cart: Cart,
    pub details: Option<CheckoutDetails>,
}

impl CheckoutSession {
    /// Summary and confirm both require a non-empty cart with saved details
    pub fn require_ready(&self) -> Result<&CheckoutDetails, TravelError> {
        if self.cart.is_empty() {
            return Err(TravelError::CheckoutIncomplete(
                "cart is empty; select a package first".to_string(),
            ));
        }
        self.details.as_ref().ok_or_else(|| {
            TravelError::CheckoutIncomplete(
                "traveler details missing; complete the details step".to_string(),
            )
        })
    }
}

/// Request DTO for POST/PUT /checkout/cart/{package_id}
#[derive(Debug, Deserialize, Validate)]
pub struct AddToCartRequest {
    #[serde(default = "default_adults")]
    #[validate(range(min = 1, max = 50))]
    pub adults: i32,

    #[serde(default)]
    #[validate(range(min = 0, max = 50))]
    pub children: i32,

    #[serde(default = "default_rooms")]
    #[validate(range(min = 1, max = 50))]
    pub rooms: i32,

    /// Replace the stored counts instead of accumulating them
    #[serde(default)]
    pub override_counts: bool,
}

fn default_adults() -> i32 {
    1
}

fn default_rooms() -> i32 {
    1
}

/// Request DTO for POST /checkout/customize/{package_id}
#[derive(Debug, Deserialize)]
pub struct CustomizeRequest {
    #[serde(default)]
    pub accommodation_ids: Vec<Uuid>,

    #[serde(default)]
    pub travel_mode_ids: Vec<Uuid>,

    #[serde(default)]
    pub custom_accommodation: Option<String>,

    #[serde(default)]
    pub self_drive: bool,
}

/// Request DTO for POST /checkout/details
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutDetailsRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 7, max = 20))]
    pub phone_number: String,

    #[serde(default)]
    pub special_requests: Option<String>,

    #[serde(default)]
    pub travel_date: Option<NaiveDate>,

    pub terms_accepted: bool,

    #[serde(default)]
    pub marketing_consent: bool,
}

/// One cart entry as returned to the client
#[derive(Debug, Serialize)]
pub struct CartItemView {
    pub package: PackageResponse,
    pub adults: i32,
    pub children: i32,
    pub rooms: i32,
    pub accommodation_ids: Vec<Uuid>,
    pub travel_mode_ids: Vec<Uuid>,
    pub custom_accommodation: Option<String>,
    pub self_drive: bool,
    pub pricing: ItemPricing,
}

/// Response carrying the session token and cart contents
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub session_token: Uuid,
    pub items: Vec<CartItemView>,
    pub traveler_count: i32,
}

/// Aggregated totals across the cart
#[derive(Debug, Serialize)]
pub struct PriceBreakdown {
    pub package_price: Decimal,
    pub accommodation_price: Decimal,
    pub travel_price: Decimal,
    pub total: Decimal,
}

impl PriceBreakdown {
    pub fn from_items(items: &[ItemPricing]) -> Self {
        Self {
            package_price: items.iter().map(|i| i.package_price).sum(),
            accommodation_price: items.iter().map(|i| i.accommodation_price).sum(),
            travel_price: items.iter().map(|i| i.travel_price).sum(),
            total: items.iter().map(|i| i.total).sum(),
        }
    }
}

/// Response for GET /checkout/summary
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub session_token: Uuid,
    pub items: Vec<CartItemView>,
    pub details: CheckoutDetails,
    pub breakdown: PriceBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            full_name: "Amina Odhiambo".to_string(),
            email: "amina@example.com".to_string(),
            phone_number: "+254700000000".to_string(),
            special_requests: None,
            travel_date: None,
            marketing_consent: false,
        }
    }

    #[test]
    fn test_empty_cart_not_ready() {
        let session = CheckoutSession {
            cart: Cart::default(),
            details: Some(details()),
        };

        assert!(matches!(
            session.require_ready(),
            Err(TravelError::CheckoutIncomplete(_))
        ));
    }

    #[test]
    fn test_missing_details_not_ready() {
        let mut session = CheckoutSession::default();
        session.cart.add_package(Uuid::new_v4(), 2, 0, 1, false);

        assert!(matches!(
            session.require_ready(),
            Err(TravelError::CheckoutIncomplete(_))
        ));
    }

    #[test]
    fn test_ready_session() {
        let mut session = CheckoutSession::default();
        session.cart.add_package(Uuid::new_v4(), 2, 0, 1, false);
        session.details = Some(details());

        assert!(session.require_ready().is_ok());
    }

    #[test]
    fn test_breakdown_sums_items() {
        let items = vec![
            ItemPricing {
                package_id: Uuid::new_v4(),
                package_price: dec!(1000),
                accommodation_price: dec!(300),
                travel_price: dec!(50),
                total: dec!(1350),
            },
            ItemPricing {
                package_id: Uuid::new_v4(),
                package_price: dec!(200),
                accommodation_price: dec!(0),
                travel_price: dec!(25),
                total: dec!(225),
            },
        ];

        let breakdown = PriceBreakdown::from_items(&items);
        assert_eq!(breakdown.package_price, dec!(1200));
        assert_eq!(breakdown.accommodation_price, dec!(300));
        assert_eq!(breakdown.travel_price, dec!(75));
        assert_eq!(breakdown.total, dec!(1575));
    }
}
