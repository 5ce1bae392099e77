// src/models/accommodation.rs
// DOCUMENTATION: Accommodation (hotel/lodge) data structures
// PURPOSE: Lodging options attachable to packages and bookings

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Accommodation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationType {
    Hotel,
    Lodge,
    Resort,
    Guesthouse,
    Airbnb,
}

impl AccommodationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccommodationType::Hotel => "hotel",
            AccommodationType::Lodge => "lodge",
            AccommodationType::Resort => "resort",
            AccommodationType::Guesthouse => "guesthouse",
            AccommodationType::Airbnb => "airbnb",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hotel" => Some(AccommodationType::Hotel),
            "lodge" => Some(AccommodationType::Lodge),
            "resort" => Some(AccommodationType::Resort),
            "guesthouse" => Some(AccommodationType::Guesthouse),
            "airbnb" => Some(AccommodationType::Airbnb),
            _ => None,
        }
    }
}

/// Accommodation record mapped from the accommodations table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Accommodation {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub accommodation_type: String,
    pub description: Option<String>,

    /// Destination this lodging belongs to
    pub destination_id: Uuid,
    pub address: Option<String>,

    /// Nightly rate per room in whole USD
    pub price_per_room_per_night: i32,
    pub max_occupancy_per_room: i32,
    pub total_rooms: i32,

    pub image_url: Option<String>,

    /// Comma-separated list of amenities
    pub amenities: Option<String>,

    pub is_active: bool,
    pub is_featured: bool,

    pub rating: Decimal,
    pub total_reviews: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating an accommodation (admin)
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateAccommodationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub slug: Option<String>,

    pub accommodation_type: AccommodationType,

    pub description: Option<String>,

    pub destination_id: Uuid,

    #[serde(default)]
    pub address: Option<String>,

    #[validate(range(min = 1))]
    pub price_per_room_per_night: i32,

    #[serde(default = "default_occupancy")]
    pub max_occupancy_per_room: i32,

    #[serde(default = "default_rooms")]
    pub total_rooms: i32,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub amenities: Option<String>,

    #[serde(default)]
    pub is_featured: bool,
}

fn default_occupancy() -> i32 {
    2
}

fn default_rooms() -> i32 {
    1
}

/// Request DTO for partial accommodation updates (admin)
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UpdateAccommodationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub price_per_room_per_night: Option<i32>,
    pub max_occupancy_per_room: Option<i32>,
    pub total_rooms: Option<i32>,
    pub image_url: Option<String>,
    pub amenities: Option<String>,
    pub is_featured: Option<bool>,
    pub rating: Option<Decimal>,
}

/// Response DTO for the public API
#[derive(Debug, Serialize)]
pub struct AccommodationResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub accommodation_type: String,
    pub description: Option<String>,
    pub destination_id: Uuid,
    pub address: Option<String>,
    pub price_per_room_per_night: i32,
    pub max_occupancy_per_room: i32,
    pub total_rooms: i32,
    pub image_url: Option<String>,

    /// Amenities split out of the stored comma-separated text
    pub amenities: Vec<String>,

    pub is_featured: bool,
    pub rating: Decimal,
    pub total_reviews: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for GET /accommodations
#[derive(Debug, Deserialize)]
pub struct AccommodationQuery {
    /// Filter by destination slug
    pub destination: Option<String>,

    #[serde(rename = "type")]
    pub type_: Option<String>,

    pub featured: Option<bool>,
}

impl Accommodation {
    /// Convert Accommodation to AccommodationResponse for API
    pub fn to_response(&self) -> AccommodationResponse {
        AccommodationResponse {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            accommodation_type: self.accommodation_type.clone(),
            description: self.description.clone(),
            destination_id: self.destination_id,
            address: self.address.clone(),
            price_per_room_per_night: self.price_per_room_per_night,
            max_occupancy_per_room: self.max_occupancy_per_room,
            total_rooms: self.total_rooms,
            image_url: self.image_url.clone(),
            amenities: self
                .amenities
                .as_deref()
                .unwrap_or_default()
                .split(',')
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
            is_featured: self.is_featured,
            rating: self.rating,
            total_reviews: self.total_reviews,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
