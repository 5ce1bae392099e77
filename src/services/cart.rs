// src/services/cart.rs
// DOCUMENTATION: Session cart model and pricing
// PURPOSE: Package selections with traveler counts, add-ons and computed totals

use crate::models::{Accommodation, Package, TravelMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A single package entry in the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub adults: i32,
    pub children: i32,
    pub rooms: i32,
    pub accommodation_ids: Vec<Uuid>,
    pub travel_mode_ids: Vec<Uuid>,
    pub custom_accommodation: Option<String>,
    pub self_drive: bool,
}

impl CartItem {
    pub fn new(adults: i32, children: i32, rooms: i32) -> Self {
        Self {
            adults,
            children,
            rooms,
            accommodation_ids: Vec::new(),
            travel_mode_ids: Vec::new(),
            custom_accommodation: None,
            self_drive: false,
        }
    }
}

/// Cart held in the checkout session, keyed by package id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub items: HashMap<Uuid, CartItem>,
}

impl Cart {
    /// Add or update a package entry
    /// override_counts replaces the traveler counts; otherwise they accumulate
    pub fn add_package(
        &mut self,
        package_id: Uuid,
        adults: i32,
        children: i32,
        rooms: i32,
        override_counts: bool,
    ) {
        match self.items.get_mut(&package_id) {
            Some(item) if !override_counts => {
                item.adults += adults;
                item.children += children;
                item.rooms += rooms;
            }
            Some(item) => {
                item.adults = adults;
                item.children = children;
                item.rooms = rooms;
            }
            None => {
                self.items
                    .insert(package_id, CartItem::new(adults, children, rooms));
            }
        }
    }

    /// Entry for customization, auto-added with defaults when missing
    pub fn entry(&mut self, package_id: Uuid) -> &mut CartItem {
        self.items
            .entry(package_id)
            .or_insert_with(|| CartItem::new(1, 0, 1))
    }

    pub fn get(&self, package_id: &Uuid) -> Option<&CartItem> {
        self.items.get(package_id)
    }

    pub fn remove_package(&mut self, package_id: &Uuid) -> bool {
        self.items.remove(package_id).is_some()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total travelers across all entries
    pub fn len(&self) -> i32 {
        self.items.values().map(|i| i.adults + i.children).sum()
    }
}

/// Price breakdown for one cart entry
#[derive(Debug, Clone, Serialize)]
pub struct ItemPricing {
    pub package_id: Uuid,
    pub package_price: Decimal,
    pub accommodation_price: Decimal,
    pub travel_price: Decimal,
    pub total: Decimal,
}

/// Per-child price: the package's child rate when set, else 70% of adult
pub fn child_unit_price(package: &Package) -> Decimal {
    if package.child_price > 0 {
        Decimal::from(package.child_price)
    } else {
        Decimal::from(package.adult_price) * Decimal::new(70, 2)
    }
}

/// Package component: adults at full rate plus children at the child rate
pub fn package_price(package: &Package, item: &CartItem) -> Decimal {
    let adult_total = Decimal::from(package.adult_price) * Decimal::from(item.adults);
    let child_total = child_unit_price(package) * Decimal::from(item.children);
    adult_total + child_total
}

/// Accommodation component: nightly rate x rooms x package duration
pub fn accommodation_price(
    accommodations: &[Accommodation],
    item: &CartItem,
    duration_days: i32,
) -> Decimal {
    accommodations
        .iter()
        .map(|a| {
            Decimal::from(a.price_per_room_per_night)
                * Decimal::from(item.rooms)
                * Decimal::from(duration_days)
        })
        .sum()
}

/// Travel component: per-person fare for every traveler
/// Self-drive skips the whole component
pub fn travel_price(travel_modes: &[TravelMode], item: &CartItem) -> Decimal {
    if item.self_drive {
        return Decimal::ZERO;
    }

    let travelers = Decimal::from(item.adults + item.children);
    travel_modes
        .iter()
        .map(|m| Decimal::from(m.price_per_person) * travelers)
        .sum()
}

/// Full breakdown for one cart entry over the rows fetched for it
pub fn price_item(
    package: &Package,
    item: &CartItem,
    accommodations: &[Accommodation],
    travel_modes: &[TravelMode],
) -> ItemPricing {
    let package_total = package_price(package, item);
    let accommodation_total = accommodation_price(accommodations, item, package.duration_days);
    let travel_total = travel_price(travel_modes, item);

    ItemPricing {
        package_id: package.id,
        package_price: package_total,
        accommodation_price: accommodation_total,
        travel_price: travel_total,
        total: package_total + accommodation_total + travel_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn sample_package(adult_price: i32, child_price: i32, duration_days: i32) -> Package {
        Package {
            id: Uuid::new_v4(),
            name: "Maasai Mara Safari".to_string(),
            slug: "maasai-mara-safari".to_string(),
            description: None,
            main_destination_id: Uuid::new_v4(),
            duration_days,
            duration_nights: duration_days - 1,
            adult_price,
            child_price,
            inclusions: None,
            exclusions: None,
            featured_image_url: None,
            total_bookings: 0,
            rating: Decimal::ZERO,
            total_reviews: 0,
            status: "published".to_string(),
            is_featured: false,
            meta_title: None,
            meta_description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            published_at: Some(Utc::now()),
        }
    }

    fn sample_accommodation(rate: i32) -> Accommodation {
        Accommodation {
            id: Uuid::new_v4(),
            name: "Mara Lodge".to_string(),
            slug: "mara-lodge".to_string(),
            accommodation_type: "lodge".to_string(),
            description: None,
            destination_id: Uuid::new_v4(),
            address: None,
            price_per_room_per_night: rate,
            max_occupancy_per_room: 2,
            total_rooms: 20,
            image_url: None,
            amenities: None,
            is_active: true,
            is_featured: false,
            rating: Decimal::ZERO,
            total_reviews: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_travel_mode(fare: i32) -> TravelMode {
        TravelMode {
            id: Uuid::new_v4(),
            name: "Nairobi Shuttle".to_string(),
            transport_type: "bus".to_string(),
            departure_location: "Nairobi".to_string(),
            arrival_location: "Narok".to_string(),
            departure_time: chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            arrival_time: chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            duration_minutes: 240,
            price_per_person: fare,
            child_discount_percentage: 0,
            description: None,
            terms_and_conditions: None,
            total_capacity: 40,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_child_price_column_wins() {
        let package = sample_package(1000, 600, 5);
        assert_eq!(child_unit_price(&package), dec!(600));
    }

    #[test]
    fn test_child_price_fallback_seventy_percent() {
        let package = sample_package(1000, 0, 5);
        assert_eq!(child_unit_price(&package), dec!(700.00));
    }

    #[test]
    fn test_package_price_mixed_travelers() {
        let package = sample_package(500, 0, 3);
        let item = CartItem::new(2, 1, 1);

        // 2 adults x 500 + 1 child x 350
        assert_eq!(package_price(&package, &item), dec!(1350.00));
    }

    #[test]
    fn test_accommodation_price_uses_duration() {
        let item = CartItem::new(2, 0, 2);
        let rows = vec![sample_accommodation(100)];

        // 100 x 2 rooms x 4 days
        assert_eq!(accommodation_price(&rows, &item, 4), dec!(800));
    }

    #[test]
    fn test_travel_price_counts_all_travelers() {
        let item = CartItem::new(2, 2, 1);
        let rows = vec![sample_travel_mode(50)];

        assert_eq!(travel_price(&rows, &item), dec!(200));
    }

    #[test]
    fn test_self_drive_skips_travel() {
        let mut item = CartItem::new(2, 2, 1);
        item.self_drive = true;
        let rows = vec![sample_travel_mode(50)];

        assert_eq!(travel_price(&rows, &item), Decimal::ZERO);
    }

    #[test]
    fn test_price_item_totals() {
        let package = sample_package(400, 0, 2);
        let item = CartItem::new(1, 0, 1);
        let acc = vec![sample_accommodation(150)];
        let modes = vec![sample_travel_mode(30)];

        let pricing = price_item(&package, &item, &acc, &modes);
        assert_eq!(pricing.package_price, dec!(400));
        assert_eq!(pricing.accommodation_price, dec!(300));
        assert_eq!(pricing.travel_price, dec!(30));
        assert_eq!(pricing.total, dec!(730));
    }

    #[test]
    fn test_cart_accumulates_counts() {
        let mut cart = Cart::default();
        let id = Uuid::new_v4();

        cart.add_package(id, 2, 1, 1, false);
        cart.add_package(id, 1, 0, 1, false);

        let item = cart.get(&id).unwrap();
        assert_eq!(item.adults, 3);
        assert_eq!(item.children, 1);
        assert_eq!(item.rooms, 2);
        assert_eq!(cart.len(), 4);
    }

    #[test]
    fn test_cart_override_counts() {
        let mut cart = Cart::default();
        let id = Uuid::new_v4();

        cart.add_package(id, 2, 1, 1, false);
        cart.add_package(id, 1, 0, 1, true);

        let item = cart.get(&id).unwrap();
        assert_eq!(item.adults, 1);
        assert_eq!(item.children, 0);
        assert_eq!(item.rooms, 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::default();
        let id = Uuid::new_v4();

        cart.add_package(id, 1, 0, 1, false);
        assert!(cart.remove_package(&id));
        assert!(!cart.remove_package(&id));
        assert!(cart.is_empty());
    }
}
