// src/models/travel_mode.rs
// DOCUMENTATION: Transport option data structures
// PURPOSE: Flights, trains, buses etc. attachable to packages

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Transport category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    Flight,
    Train,
    Bus,
    Car,
    Boat,
    Cruiser,
}

impl TransportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportType::Flight => "flight",
            TransportType::Train => "train",
            TransportType::Bus => "bus",
            TransportType::Car => "car",
            TransportType::Boat => "boat",
            TransportType::Cruiser => "cruiser",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "flight" => Some(TransportType::Flight),
            "train" => Some(TransportType::Train),
            "bus" => Some(TransportType::Bus),
            "car" => Some(TransportType::Car),
            "boat" => Some(TransportType::Boat),
            "cruiser" => Some(TransportType::Cruiser),
            _ => None,
        }
    }
}

/// Travel mode record mapped from the travel_modes table
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TravelMode {
    pub id: Uuid,

    /// e.g. "Kenya Airways Morning Flight"
    pub name: String,
    pub transport_type: String,

    pub departure_location: String,
    pub arrival_location: String,

    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub duration_minutes: i32,

    /// Fare per adult in whole USD
    pub price_per_person: i32,

    /// Percentage discount applied to child fares (0-100)
    pub child_discount_percentage: i32,

    pub description: Option<String>,
    pub terms_and_conditions: Option<String>,

    pub total_capacity: i32,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating a travel mode (admin)
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CreateTravelModeRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub transport_type: TransportType,

    #[validate(length(min = 1, max = 200))]
    pub departure_location: String,

    #[validate(length(min = 1, max = 200))]
    pub arrival_location: String,

    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,

    #[validate(range(min = 1))]
    pub duration_minutes: i32,

    #[validate(range(min = 1))]
    pub price_per_person: i32,

    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub child_discount_percentage: i32,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub terms_and_conditions: Option<String>,

    #[serde(default = "default_capacity")]
    pub total_capacity: i32,
}

fn default_capacity() -> i32 {
    50
}

/// Request DTO for partial travel mode updates (admin)
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UpdateTravelModeRequest {
    pub name: Option<String>,
    pub departure_time: Option<NaiveTime>,
    pub arrival_time: Option<NaiveTime>,
    pub duration_minutes: Option<i32>,
    pub price_per_person: Option<i32>,
    pub child_discount_percentage: Option<i32>,
    pub description: Option<String>,
    pub terms_and_conditions: Option<String>,
    pub total_capacity: Option<i32>,
}

/// Response DTO for the public API
#[derive(Debug, Serialize)]
pub struct TravelModeResponse {
    pub id: Uuid,
    pub name: String,
    pub transport_type: String,
    pub departure_location: String,
    pub arrival_location: String,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
    pub duration_minutes: i32,
    pub price_per_person: i32,
    pub child_discount_percentage: i32,

    /// Fare per child after the discount
    pub child_price: i32,

    pub description: Option<String>,
    pub terms_and_conditions: Option<String>,
    pub total_capacity: i32,
}

/// Query parameters for GET /travel-modes
#[derive(Debug, Deserialize)]
pub struct TravelModeQuery {
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

impl TravelMode {
    /// Child fare after the percentage discount (integer USD)
    pub fn child_price(&self) -> i32 {
        self.price_per_person * (100 - self.child_discount_percentage) / 100
    }

    /// Convert TravelMode to TravelModeResponse for API
    pub fn to_response(&self) -> TravelModeResponse {
        TravelModeResponse {
            id: self.id,
            name: self.name.clone(),
            transport_type: self.transport_type.clone(),
            departure_location: self.departure_location.clone(),
            arrival_location: self.arrival_location.clone(),
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            duration_minutes: self.duration_minutes,
            price_per_person: self.price_per_person,
            child_discount_percentage: self.child_discount_percentage,
            child_price: self.child_price(),
            description: self.description.clone(),
            terms_and_conditions: self.terms_and_conditions.clone(),
            total_capacity: self.total_capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_mode(price: i32, discount: i32) -> TravelMode {
        TravelMode {
            id: Uuid::new_v4(),
            name: "Morning Flight".to_string(),
            transport_type: "flight".to_string(),
            departure_location: "Nairobi".to_string(),
            arrival_location: "Mombasa".to_string(),
            departure_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            duration_minutes: 60,
            price_per_person: price,
            child_discount_percentage: discount,
            description: None,
            terms_and_conditions: None,
            total_capacity: 50,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_child_price_discount() {
        let mode = sample_mode(200, 25);
        assert_eq!(mode.child_price(), 150);
    }

    #[test]
    fn test_child_price_no_discount() {
        let mode = sample_mode(200, 0);
        assert_eq!(mode.child_price(), 200);
    }

    #[test]
    fn test_child_price_rounds_down() {
        let mode = sample_mode(99, 50);
        // 99 * 50 / 100 = 49 with integer division
        assert_eq!(mode.child_price(), 49);
    }
}
