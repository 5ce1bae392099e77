// src/models/user.rs
// DOCUMENTATION: User account, profile and bucket list data structures
// PURPOSE: Registered-customer models for the accounts surface

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// User account record mapped from the user_accounts table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserAccount {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,

    /// Salted SHA-256 digest, hex encoded
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Per-account random salt, hex encoded
    #[serde(skip_serializing)]
    pub password_salt: String,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Extended profile, created alongside the account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub passport_number: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,

    /// budget / mid_range / luxury / adventure / cultural / wildlife / beach
    pub preferred_travel_style: Option<String>,

    pub dietary_requirements: Option<String>,
    pub special_needs: Option<String>,

    pub email_notifications: bool,
    pub marketing_emails: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Travel style preference values accepted on profile updates
pub const TRAVEL_STYLES: &[&str] = &[
    "budget",
    "mid_range",
    "luxury",
    "adventure",
    "cultural",
    "wildlife",
    "beach",
];

/// Request DTO for POST /accounts/register
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Optional; derived from the email local part when absent
    pub username: Option<String>,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
}

/// Request DTO for POST /accounts/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    pub password: String,
}

/// Request DTO for PUT /accounts/profile
#[derive(Debug, Deserialize, Default)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub passport_number: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub preferred_travel_style: Option<String>,
    pub dietary_requirements: Option<String>,
    pub special_needs: Option<String>,
    pub email_notifications: Option<bool>,
    pub marketing_emails: Option<bool>,
}

/// Response DTO pairing account and profile
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub passport_number: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub preferred_travel_style: Option<String>,
    pub dietary_requirements: Option<String>,
    pub special_needs: Option<String>,
    pub email_notifications: bool,
    pub marketing_emails: bool,
    pub created_at: DateTime<Utc>,
}

/// Auth response for register/login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
}

/// Kind of item saved on a bucket list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketItemType {
    Package,
    Accommodation,
    Destination,
}

impl BucketItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BucketItemType::Package => "package",
            BucketItemType::Accommodation => "accommodation",
            BucketItemType::Destination => "destination",
        }
    }
}

/// Bucket list entry mapped from the bucket_list table
/// Exactly one of the three item ids is set, matching item_type
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BucketListEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub item_type: String,
    pub package_id: Option<Uuid>,
    pub accommodation_id: Option<Uuid>,
    pub destination_id: Option<Uuid>,
    pub notes: Option<String>,

    /// high / medium / low
    pub priority: String,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for POST /accounts/bucket-list
#[derive(Debug, Deserialize)]
pub struct AddBucketItemRequest {
    pub item_type: BucketItemType,
    pub item_id: Uuid,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_priority() -> String {
    "medium".to_string()
}

/// Bucket list entry enriched with the referenced item's name/image
#[derive(Debug, Serialize)]
pub struct BucketItemResponse {
    pub id: Uuid,
    pub item_type: String,
    pub item_id: Uuid,
    pub item_name: String,
    pub item_image_url: Option<String>,
    pub notes: Option<String>,
    pub priority: String,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Pair the account with its profile row for the API
    pub fn to_profile_response(&self, profile: &UserProfile) -> ProfileResponse {
        ProfileResponse {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            phone_number: profile.phone_number.clone(),
            date_of_birth: profile.date_of_birth,
            nationality: profile.nationality.clone(),
            passport_number: profile.passport_number.clone(),
            emergency_contact_name: profile.emergency_contact_name.clone(),
            emergency_contact_phone: profile.emergency_contact_phone.clone(),
            preferred_travel_style: profile.preferred_travel_style.clone(),
            dietary_requirements: profile.dietary_requirements.clone(),
            special_needs: profile.special_needs.clone(),
            email_notifications: profile.email_notifications,
            marketing_emails: profile.marketing_emails,
            created_at: self.created_at,
        }
    }
}
