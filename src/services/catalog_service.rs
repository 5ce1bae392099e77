// src/services/catalog_service.rs
// DOCUMENTATION: Catalog business rules
// PURPOSE: Slug generation and destination hierarchy validation

use crate::db::BlogRepository;
use crate::errors::TravelError;
use crate::models::{Destination, DestinationType};
use sqlx::PgPool;

/// Clean a name into a url-safe slug
/// "&" becomes "and", whitespace collapses to dashes, lowercase ASCII only
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;

    for c in name.to_lowercase().replace('&', " and ").chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if (c.is_whitespace() || c == '-' || c == '_') && !last_dash {
            slug.push('-');
            last_dash = true;
        }
        // anything else is dropped
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Enforce the country -> city -> place hierarchy
/// The parent row, when required, must already be loaded by the caller
pub fn validate_destination_parent(
    destination_type: DestinationType,
    parent: Option<&Destination>,
) -> Result<(), TravelError> {
    match (destination_type, parent) {
        (DestinationType::Country, None) => Ok(()),
        (DestinationType::Country, Some(_)) => Err(TravelError::InvalidInput(
            "a country cannot have a parent destination".to_string(),
        )),
        (DestinationType::City, Some(p)) if p.destination_type == "country" => Ok(()),
        (DestinationType::City, _) => Err(TravelError::InvalidInput(
            "a city must have a country parent".to_string(),
        )),
        (DestinationType::Place, Some(p)) if p.destination_type == "city" => Ok(()),
        (DestinationType::Place, _) => Err(TravelError::InvalidInput(
            "a place must have a city parent".to_string(),
        )),
    }
}

/// Comma-joined name from the country down to the destination itself
/// `ancestors` comes nearest-first, as `DestinationRepository::ancestors` returns it
pub fn full_name(ancestors: &[Destination], destination: &Destination) -> String {
    let mut parts: Vec<&str> = ancestors.iter().rev().map(|d| d.name.as_str()).collect();
    parts.push(&destination.name);
    parts.join(", ")
}

/// Unique blog post slug: base slug, then -2, -3... on collision
pub async fn derive_post_slug(pool: &PgPool, title: &str) -> Result<String, TravelError> {
    let base = slugify(title);
    let base = if base.is_empty() {
        "post".to_string()
    } else {
        base
    };

    if !BlogRepository::post_slug_exists(pool, &base).await? {
        return Ok(base);
    }

    for suffix in 2..=1000 {
        let candidate = format!("{}-{}", base, suffix);
        if !BlogRepository::post_slug_exists(pool, &candidate).await? {
            return Ok(candidate);
        }
    }

    Err(TravelError::InvalidInput(format!(
        "could not derive a unique slug for '{}'",
        title
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn destination(dest_type: &str) -> Destination {
        Destination {
            id: Uuid::new_v4(),
            name: "Kenya".to_string(),
            slug: "kenya".to_string(),
            destination_type: dest_type.to_string(),
            description: None,
            image_url: None,
            parent_id: None,
            meta_title: None,
            meta_description: None,
            starting_price: None,
            display_order: 0,
            is_featured: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Maasai Mara"), "maasai-mara");
        assert_eq!(slugify("  Lake   Nakuru  "), "lake-nakuru");
    }

    #[test]
    fn test_slugify_ampersand() {
        assert_eq!(slugify("Beach & Bush"), "beach-and-bush");
    }

    #[test]
    fn test_slugify_drops_punctuation() {
        assert_eq!(slugify("Hell's Gate!"), "hells-gate");
        assert_eq!(slugify("Tsavo (East)"), "tsavo-east");
    }

    #[test]
    fn test_country_cannot_have_parent() {
        let parent = destination("country");
        assert!(validate_destination_parent(DestinationType::Country, None).is_ok());
        assert!(validate_destination_parent(DestinationType::Country, Some(&parent)).is_err());
    }

    #[test]
    fn test_city_requires_country_parent() {
        let country = destination("country");
        let city = destination("city");

        assert!(validate_destination_parent(DestinationType::City, Some(&country)).is_ok());
        assert!(validate_destination_parent(DestinationType::City, Some(&city)).is_err());
        assert!(validate_destination_parent(DestinationType::City, None).is_err());
    }

    #[test]
    fn test_place_requires_city_parent() {
        let city = destination("city");
        let country = destination("country");

        assert!(validate_destination_parent(DestinationType::Place, Some(&city)).is_ok());
        assert!(validate_destination_parent(DestinationType::Place, Some(&country)).is_err());
    }

    #[test]
    fn test_full_name_orders_country_first() {
        let mut country = destination("country");
        country.name = "Kenya".to_string();
        let mut city = destination("city");
        city.name = "Nairobi".to_string();
        let mut place = destination("place");
        place.name = "Karen".to_string();

        // ancestors arrive nearest-first: city, then country
        assert_eq!(full_name(&[city, country], &place), "Kenya, Nairobi, Karen");
    }

    #[test]
    fn test_full_name_without_ancestors() {
        let country = destination("country");
        assert_eq!(full_name(&[], &country), "Kenya");
    }
}
