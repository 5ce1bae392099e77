// src/services/mod.rs
// DOCUMENTATION: Business logic modules

pub mod account_service;
pub mod booking_service;
pub mod cart;
pub mod catalog_service;
pub mod checkout;
pub mod mailer;
pub mod session_store;

pub use mailer::EmailClient;
pub use session_store::SessionStore;
