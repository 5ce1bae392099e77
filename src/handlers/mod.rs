// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod accommodations;
pub mod accounts;
pub mod admin;
pub mod blog;
pub mod checkout;
pub mod destinations;
pub mod health;
pub mod newsletter;
pub mod packages;
pub mod quotes;
pub mod travel_modes;

pub use accommodations::config as accommodations_config;
pub use accounts::config as accounts_config;
pub use admin::config as admin_config;
pub use blog::config as blog_config;
pub use checkout::config as checkout_config;
pub use destinations::config as destinations_config;
pub use health::config as health_config;
pub use newsletter::config as newsletter_config;
pub use packages::config as packages_config;
pub use quotes::config as quotes_config;
pub use travel_modes::config as travel_modes_config;
