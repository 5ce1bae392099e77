// src/db/mod.rs
// DOCUMENTATION: Database repository modules

pub mod accommodation_repository;
pub mod blog_repository;
pub mod booking_repository;
pub mod destination_repository;
pub mod newsletter_repository;
pub mod package_repository;
pub mod quote_repository;
pub mod travel_mode_repository;
pub mod user_repository;

pub use accommodation_repository::AccommodationRepository;
pub use blog_repository::BlogRepository;
pub use booking_repository::BookingRepository;
pub use destination_repository::DestinationRepository;
pub use newsletter_repository::NewsletterRepository;
pub use package_repository::PackageRepository;
pub use quote_repository::QuoteRepository;
pub use travel_mode_repository::TravelModeRepository;
pub use user_repository::UserRepository;
