// src/models/quote.rs
// DOCUMENTATION: Quote request data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Enquiry record mapped from the quote_requests table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuoteRequest {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,

    /// Free text, not a catalog reference; the enquiry may predate the catalog
    pub destination: Option<String>,
    pub preferred_travel_dates: Option<String>,
    pub number_of_travelers: i32,
    pub special_requests: Option<String>,

    /// Set when the enquiry came from a package page and the package still exists
    pub package_id: Option<Uuid>,

    pub confirmation_email_sent: bool,
    pub admin_notification_sent: bool,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for POST /quotes
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(max = 50))]
    pub phone_number: Option<String>,

    #[validate(length(max = 200))]
    pub destination: Option<String>,

    #[validate(length(max = 100))]
    pub preferred_travel_dates: Option<String>,

    #[serde(default = "default_travelers")]
    #[validate(range(min = 1, max = 100))]
    pub number_of_travelers: i32,

    pub special_requests: Option<String>,

    /// Optional package the enquiry was started from
    pub package_id: Option<Uuid>,
}

fn default_travelers() -> i32 {
    1
}

/// Query parameters for the admin quote listing
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
