// src/models/booking.rs
// DOCUMENTATION: Booking data structures
// PURPOSE: Guest and registered-user reservations with computed totals

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle state of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            _ => None,
        }
    }
}

/// Booking record mapped from the bookings table
/// DOCUMENTATION: user_id is NULL for pure guest bookings whose
/// account creation failed; contact fields are always present
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: Uuid,

    /// Human-facing unique reference, e.g. "TRV1234567"
    pub booking_reference: String,

    pub package_id: Uuid,
    pub user_id: Option<Uuid>,

    pub full_name: String,
    pub email: String,
    pub phone_number: String,

    pub number_of_adults: i32,
    pub number_of_children: i32,
    pub number_of_rooms: i32,

    /// Price breakdown computed server-side at confirmation
    pub package_price: Decimal,
    pub accommodation_price: Decimal,
    pub travel_price: Decimal,
    pub total_amount: Decimal,

    pub special_requests: Option<String>,
    pub travel_date: Option<NaiveDate>,

    pub status: String,

    pub confirmation_email_sent: bool,
    pub admin_notification_sent: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload assembled by the booking service
/// DOCUMENTATION: Not an HTTP DTO - checkout builds this from session state
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub booking_reference: String,
    pub package_id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub number_of_adults: i32,
    pub number_of_children: i32,
    pub number_of_rooms: i32,
    pub package_price: Decimal,
    pub accommodation_price: Decimal,
    pub travel_price: Decimal,
    pub total_amount: Decimal,
    pub special_requests: Option<String>,
    pub travel_date: Option<NaiveDate>,
    pub accommodation_ids: Vec<Uuid>,
    pub travel_mode_ids: Vec<Uuid>,
}

/// Request DTO for PUT /admin/bookings/{id}/status
#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

/// Response DTO for bookings
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub booking_reference: String,
    pub package_id: Uuid,
    pub user_id: Option<Uuid>,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub number_of_adults: i32,
    pub number_of_children: i32,
    pub number_of_rooms: i32,
    pub package_price: Decimal,
    pub accommodation_price: Decimal,
    pub travel_price: Decimal,
    pub total_amount: Decimal,
    pub special_requests: Option<String>,
    pub travel_date: Option<NaiveDate>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Confirmation view for GET /bookings/{reference}
#[derive(Debug, Serialize)]
pub struct BookingConfirmationResponse {
    #[serde(flatten)]
    pub booking: BookingResponse,

    pub package_name: String,

    /// Deep link for contacting the agency about this booking
    pub whatsapp_link: String,
}

/// Query parameters for GET /admin/bookings
#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Booking {
    /// Convert Booking to BookingResponse for API
    pub fn to_response(&self) -> BookingResponse {
        BookingResponse {
            id: self.id,
            booking_reference: self.booking_reference.clone(),
            package_id: self.package_id,
            user_id: self.user_id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            number_of_adults: self.number_of_adults,
            number_of_children: self.number_of_children,
            number_of_rooms: self.number_of_rooms,
            package_price: self.package_price,
            accommodation_price: self.accommodation_price,
            travel_price: self.travel_price,
            total_amount: self.total_amount,
            special_requests: self.special_requests.clone(),
            travel_date: self.travel_date,
            status: self.status.clone(),
            created_at: self.created_at,
        }
    }
}
