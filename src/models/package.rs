// src/models/package.rs
// DOCUMENTATION: Travel package and itinerary data structures
// PURPOSE: Sellable packages with pricing, add-ons and day-by-day plans

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{AccommodationResponse, TravelModeResponse};

/// Publication state of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    Draft,
    Published,
    Archived,
}

impl PackageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageStatus::Draft => "draft",
            PackageStatus::Published => "published",
            PackageStatus::Archived => "archived",
        }
    }
}

/// Package record mapped from the packages table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Package {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,

    /// Primary destination; sub-destinations appear in the itinerary
    pub main_destination_id: Uuid,

    pub duration_days: i32,
    pub duration_nights: i32,

    /// Per-person prices in whole USD
    pub adult_price: i32,
    pub child_price: i32,

    pub inclusions: Option<String>,
    pub exclusions: Option<String>,

    pub featured_image_url: Option<String>,

    pub total_bookings: i32,
    pub rating: Decimal,
    pub total_reviews: i32,

    /// "draft", "published" or "archived"
    pub status: String,
    pub is_featured: bool,

    pub meta_title: Option<String>,
    pub meta_description: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Set on first transition to published
    pub published_at: Option<DateTime<Utc>>,
}

/// Itinerary header, one per package
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Itinerary {
    pub id: Uuid,
    pub package_id: Uuid,
    pub title: String,
    pub overview: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One day inside an itinerary
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ItineraryDay {
    pub id: Uuid,
    pub itinerary_id: Uuid,

    /// 1-based, unique within the itinerary
    pub day_number: i32,
    pub title: String,
    pub description: String,

    /// Optional destination visited on this day
    pub destination_id: Option<Uuid>,

    /// Accommodation for this night, if different from package default
    pub accommodation_id: Option<Uuid>,

    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a package (admin)
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreatePackageRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub slug: Option<String>,

    pub description: Option<String>,

    pub main_destination_id: Uuid,

    #[validate(range(min = 1))]
    pub duration_days: i32,

    #[validate(range(min = 0))]
    pub duration_nights: i32,

    #[validate(range(min = 1))]
    pub adult_price: i32,

    #[validate(range(min = 0))]
    pub child_price: i32,

    #[serde(default)]
    pub inclusions: Option<String>,

    #[serde(default)]
    pub exclusions: Option<String>,

    #[serde(default)]
    pub featured_image_url: Option<String>,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub meta_title: Option<String>,

    #[serde(default)]
    pub meta_description: Option<String>,
}

/// Request DTO for partial package updates (admin)
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UpdatePackageRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_days: Option<i32>,
    pub duration_nights: Option<i32>,
    pub adult_price: Option<i32>,
    pub child_price: Option<i32>,
    pub inclusions: Option<String>,
    pub exclusions: Option<String>,
    pub featured_image_url: Option<String>,
    pub is_featured: Option<bool>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,

    /// Status transition; first move to published stamps published_at
    pub status: Option<PackageStatus>,
}

/// Request DTO replacing a package itinerary wholesale (admin)
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SetItineraryRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    pub overview: Option<String>,

    pub days: Vec<ItineraryDayInput>,
}

/// Day payload inside SetItineraryRequest
#[derive(Debug, Serialize, Deserialize)]
pub struct ItineraryDayInput {
    pub day_number: i32,
    pub title: String,
    pub description: String,

    #[serde(default)]
    pub destination_id: Option<Uuid>,

    #[serde(default)]
    pub accommodation_id: Option<Uuid>,

    #[serde(default)]
    pub breakfast: bool,

    #[serde(default)]
    pub lunch: bool,

    #[serde(default)]
    pub dinner: bool,
}

/// Request DTO setting package add-on join sets (admin)
#[derive(Debug, Serialize, Deserialize)]
pub struct SetPackageOptionsRequest {
    #[serde(default)]
    pub accommodation_ids: Vec<Uuid>,

    #[serde(default)]
    pub travel_mode_ids: Vec<Uuid>,
}

/// Response DTO for package listings
#[derive(Debug, Serialize)]
pub struct PackageResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub main_destination_id: Uuid,
    pub duration_days: i32,
    pub duration_nights: i32,
    pub adult_price: i32,
    pub child_price: i32,
    pub inclusions: Option<String>,
    pub exclusions: Option<String>,
    pub featured_image_url: Option<String>,
    pub total_bookings: i32,
    pub rating: Decimal,
    pub total_reviews: i32,
    pub status: String,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Itinerary response embedded in package detail
#[derive(Debug, Serialize)]
pub struct ItineraryResponse {
    pub title: String,
    pub overview: Option<String>,
    pub days: Vec<ItineraryDayResponse>,
}

#[derive(Debug, Serialize)]
pub struct ItineraryDayResponse {
    pub day_number: i32,
    pub title: String,
    pub description: String,
    pub destination_id: Option<Uuid>,
    pub accommodation_id: Option<Uuid>,
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
}

/// Detail response for GET /packages/{slug}
#[derive(Debug, Serialize)]
pub struct PackageDetailResponse {
    #[serde(flatten)]
    pub package: PackageResponse,
    pub itinerary: Option<ItineraryResponse>,
    pub available_accommodations: Vec<AccommodationResponse>,
    pub available_travel_modes: Vec<TravelModeResponse>,
}

/// Query parameters for GET /packages
#[derive(Debug, Default, Deserialize)]
pub struct PackageQuery {
    /// Full-text over name and description
    pub q: Option<String>,

    /// Filter by main destination slug
    pub destination: Option<String>,

    pub featured: Option<bool>,
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
    pub max_price: Option<i32>,

    /// Page number (1-based)
    pub page: Option<i64>,

    /// Results per page (max 100)
    pub limit: Option<i64>,
}

/// Paginated package listing
#[derive(Debug, Serialize)]
pub struct PackageSearchResponse {
    pub data: Vec<PackageResponse>,
    pub total_count: i64,
    pub page: i64,
    pub limit: i64,
    pub has_more: bool,
}

impl Package {
    pub fn is_published(&self) -> bool {
        self.status == "published"
    }

    /// Convert Package to PackageResponse for API
    pub fn to_response(&self) -> PackageResponse {
        PackageResponse {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            main_destination_id: self.main_destination_id,
            duration_days: self.duration_days,
            duration_nights: self.duration_nights,
            adult_price: self.adult_price,
            child_price: self.child_price,
            inclusions: self.inclusions.clone(),
            exclusions: self.exclusions.clone(),
            featured_image_url: self.featured_image_url.clone(),
            total_bookings: self.total_bookings,
            rating: self.rating,
            total_reviews: self.total_reviews,
            status: self.status.clone(),
            is_featured: self.is_featured,
            created_at: self.created_at,
            published_at: self.published_at,
        }
    }
}

impl ItineraryDay {
    pub fn to_response(&self) -> ItineraryDayResponse {
        ItineraryDayResponse {
            day_number: self.day_number,
            title: self.title.clone(),
            description: self.description.clone(),
            destination_id: self.destination_id,
            accommodation_id: self.accommodation_id,
            breakfast: self.breakfast,
            lunch: self.lunch,
            dinner: self.dinner,
        }
    }
}
