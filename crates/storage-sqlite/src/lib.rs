//! SQLite storage implementation for fundlift.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `fundlift-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. `fundlift-core` is database-agnostic and works with traits.
//!
//! All writes go through a single-writer actor ([`db::WriteHandle`]) that
//! executes each job inside an immediate transaction on a dedicated
//! connection. The ledger's read-modify-write sequences (donation increment
//! + goal check, claim stock decrement, sweep refunds) rely on that
//! serialization.

pub mod db;
pub mod errors;
pub mod schema;
pub(crate) mod utils;

// Repository implementations
pub mod campaigns;
pub mod donations;
pub mod people;
pub mod requirements;
pub mod rewards;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from fundlift-core for convenience
pub use fundlift_core::errors::{DatabaseError, Error, Result};
