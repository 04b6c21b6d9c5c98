//! Fundlift Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for the fundlift
//! crowdfunding platform. It is database-agnostic and defines traits
//! that are implemented by the `storage-sqlite` crate.

pub mod auth;
pub mod campaigns;
pub mod donations;
pub mod errors;
pub mod gateway;
pub mod notifications;
pub mod people;
pub mod requirements;
pub mod rewards;
pub mod states;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
