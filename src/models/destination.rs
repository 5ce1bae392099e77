// src/models/destination.rs
// DOCUMENTATION: Destination hierarchy data structures
// PURPOSE: Country -> city -> place catalog models and DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Level in the destination hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationType {
    Country,
    City,
    Place,
}

impl DestinationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationType::Country => "country",
            DestinationType::City => "city",
            DestinationType::Place => "place",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "country" => Some(DestinationType::Country),
            "city" => Some(DestinationType::City),
            "place" => Some(DestinationType::Place),
            _ => None,
        }
    }
}

/// Destination record mapped from the destinations table
/// DOCUMENTATION: Hierarchical via parent_id (countries have none)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Destination {
    pub id: Uuid,
    pub name: String,

    /// URL slug, unique across all destinations
    pub slug: String,

    /// "country", "city" or "place"
    pub destination_type: String,

    pub description: Option<String>,
    pub image_url: Option<String>,

    /// Parent in the hierarchy; NULL for countries
    pub parent_id: Option<Uuid>,

    /// SEO metadata
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,

    /// Starting price for packages to this destination (whole USD)
    pub starting_price: Option<i32>,

    pub display_order: i32,
    pub is_featured: bool,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a destination (admin)
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateDestinationRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    /// Optional explicit slug; derived from name when absent
    pub slug: Option<String>,

    pub destination_type: DestinationType,

    pub description: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    /// Parent destination id; required for cities and places
    pub parent_id: Option<Uuid>,

    #[serde(default)]
    pub meta_title: Option<String>,

    #[serde(default)]
    pub meta_description: Option<String>,

    #[serde(default)]
    pub starting_price: Option<i32>,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default)]
    pub is_featured: bool,
}

/// Request DTO for partial destination updates (admin)
/// All fields optional - only provided fields are updated
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UpdateDestinationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub starting_price: Option<i32>,
    pub display_order: Option<i32>,
    pub is_featured: Option<bool>,
}

/// Response DTO for the public API
#[derive(Debug, Serialize)]
pub struct DestinationResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub destination_type: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub parent_id: Option<Uuid>,
    pub starting_price: Option<i32>,
    pub display_order: i32,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Detail response with hierarchy context
/// DOCUMENTATION: Used for GET /destinations/{slug}
#[derive(Debug, Serialize)]
pub struct DestinationDetailResponse {
    #[serde(flatten)]
    pub destination: DestinationResponse,

    /// Comma-joined ancestor chain, e.g. "Kenya, Nairobi, Karen"
    pub full_name: String,

    /// Direct active children ordered by display_order, name
    pub children: Vec<DestinationResponse>,
}

/// Query parameters for GET /destinations
#[derive(Debug, Deserialize)]
pub struct DestinationQuery {
    /// Filter by hierarchy level
    #[serde(rename = "type")]
    pub type_: Option<String>,

    /// Filter by parent slug
    pub parent: Option<String>,

    /// Only featured destinations
    pub featured: Option<bool>,
}

impl Destination {
    /// Convert Destination to DestinationResponse for API
    pub fn to_response(&self) -> DestinationResponse {
        DestinationResponse {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            destination_type: self.destination_type.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            parent_id: self.parent_id,
            starting_price: self.starting_price,
            display_order: self.display_order,
            is_featured: self.is_featured,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
