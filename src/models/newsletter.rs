// src/models/newsletter.rs
// DOCUMENTATION: Newsletter subscription data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Subscription record mapped from the newsletter_subscriptions table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NewsletterSubscription {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_confirmed: bool,

    /// Content preferences
    pub travel_tips: bool,
    pub special_offers: bool,
    pub destination_updates: bool,

    pub subscription_date: DateTime<Utc>,
    pub confirmation_date: Option<DateTime<Utc>>,

    /// Secure token embedded in confirm/unsubscribe links
    #[serde(skip_serializing)]
    pub unsubscribe_token: String,

    pub confirmation_email_sent: bool,
    pub admin_notification_sent: bool,
}

/// Request DTO for POST /newsletter/subscribe
#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email)]
    pub email: String,

    #[serde(default = "default_true")]
    pub travel_tips: bool,

    #[serde(default = "default_true")]
    pub special_offers: bool,

    #[serde(default = "default_true")]
    pub destination_updates: bool,
}

fn default_true() -> bool {
    true
}

/// Response DTO for subscription state
#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub email: String,
    pub is_active: bool,
    pub is_confirmed: bool,
    pub subscription_date: DateTime<Utc>,
}

impl NewsletterSubscription {
    pub fn to_response(&self) -> SubscriptionResponse {
        SubscriptionResponse {
            email: self.email.clone(),
            is_active: self.is_active,
            is_confirmed: self.is_confirmed,
            subscription_date: self.subscription_date,
        }
    }
}
