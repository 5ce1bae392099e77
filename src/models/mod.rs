// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod accommodation;
pub mod blog;
pub mod booking;
pub mod destination;
pub mod newsletter;
pub mod package;
pub mod quote;
pub mod travel_mode;
pub mod user;

pub use accommodation::*;
pub use blog::*;
pub use booking::*;
pub use destination::*;
pub use newsletter::*;
pub use package::*;
pub use quote::*;
pub use travel_mode::*;
pub use user::*;
