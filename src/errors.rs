//! Unified error type for the crate.
//!
//! Every fallible operation returns [`Result`]. Callers embedding this crate
//! in a request/response layer are expected to map the not-found and
//! closed-bundle variants to their own error responses instead of letting
//! them propagate as panics.

use rust_decimal::Decimal;
use thiserror::Error;

/// All error conditions produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or input validation failure with a human-readable message
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what was invalid
        message: String,
    },

    /// A quantity (order amount or delivered amount) was negative
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected quantity
        amount: i64,
    },

    /// A product price was negative
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The rejected price
        price: Decimal,
    },

    /// A unit divisor was zero or negative
    #[error("Invalid unit divisor: {divisor}")]
    InvalidDivisor {
        /// The rejected divisor
        divisor: i64,
    },

    /// Referenced unit does not exist
    #[error("Unit not found: {name}")]
    UnitNotFound {
        /// Name or id of the missing unit
        name: String,
    },

    /// Referenced group does not exist
    #[error("Group not found: {name}")]
    GroupNotFound {
        /// Name or id of the missing group
        name: String,
    },

    /// Referenced product does not exist
    #[error("Product not found: {name}")]
    ProductNotFound {
        /// Name or id of the missing product
        name: String,
    },

    /// Referenced bundle does not exist
    #[error("Bundle not found: {id}")]
    BundleNotFound {
        /// Id of the missing bundle
        id: i64,
    },

    /// Attempt to change an order amount on a bundle that is no longer open
    #[error("Bundle {id} is closed for ordering")]
    BundleClosed {
        /// Id of the closed bundle
        id: i64,
    },

    /// Database error from the storage layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error, e.g. while reading the seed catalog
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error during bootstrap
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
