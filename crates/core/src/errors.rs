//! Core error types for the fundlift platform.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage
//! layer. Domain modules contribute their own error enums, folded into the
//! root `Error` below; `Error::kind` maps every variant onto the platform's
//! error taxonomy so callers can translate uniformly (e.g. to HTTP statuses).

use chrono::{NaiveDate, ParseError as ChronoParseError};
use thiserror::Error;

use crate::campaigns::CampaignError;
use crate::donations::DonationError;
use crate::requirements::RequirementError;
use crate::rewards::RewardError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the platform core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Campaign error: {0}")]
    Campaign(#[from] CampaignError),

    #[error("Donation error: {0}")]
    Donation(#[from] DonationError),

    #[error("Reward error: {0}")]
    Reward(#[from] RewardError),

    #[error("Requirement error: {0}")]
    Requirement(#[from] RequirementError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// The platform error taxonomy. Every `Error` maps onto exactly one kind;
/// the human-readable detail stays on the variant itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Conflict,
    InvalidArgument,
    PreconditionFailed,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Database(db) => match db {
                DatabaseError::NotFound(_) => ErrorKind::NotFound,
                DatabaseError::UniqueViolation(_) => ErrorKind::Conflict,
                _ => ErrorKind::Internal,
            },
            Error::Validation(_) => ErrorKind::InvalidArgument,
            Error::Forbidden(_) => ErrorKind::Forbidden,
            Error::Campaign(e) => e.kind(),
            Error::Donation(e) => e.kind(),
            Error::Reward(e) => e.kind(),
            Error::Requirement(e) => e.kind(),
            Error::Unexpected(_) => ErrorKind::Internal,
        }
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(rust_decimal::Decimal),

    #[error("Expiration date {0} is not in the future")]
    PastExpiration(NaiveDate),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
