//! Unit business logic - Handles all unit-related operations.
//!
//! Units carry the conversion between the unit a price refers to and the
//! unit an order is placed in. All functions are async and return Result
//! types for proper error handling throughout the system.

use crate::{
    entities::{Unit, unit},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all units from the database, ordered alphabetically by name.
pub async fn get_all_units(db: &DatabaseConnection) -> Result<Vec<unit::Model>> {
    Unit::find()
        .order_by_asc(unit::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a specific unit by its name, returning None if not found.
pub async fn get_unit_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<unit::Model>> {
    Unit::find()
        .filter(unit::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific unit by its unique ID.
pub async fn get_unit_by_id(db: &DatabaseConnection, unit_id: i64) -> Result<Option<unit::Model>> {
    Unit::find_by_id(unit_id).one(db).await.map_err(Into::into)
}

/// Creates a new unit with the specified parameters, performing input validation.
///
/// The divisor converts a price per unit into a price per order increment
/// and must be at least 1.
///
/// # Errors
/// Returns an error if:
/// - The unit name is empty or whitespace-only
/// - The divisor is less than 1
/// - The database insert operation fails
pub async fn create_unit(
    db: &DatabaseConnection,
    name: String,
    order_name: Option<String>,
    divisor: i64,
) -> Result<unit::Model> {
    // Validate inputs
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Unit name cannot be empty".to_string(),
        });
    }

    if divisor < 1 {
        return Err(Error::InvalidDivisor { divisor });
    }

    let unit = unit::ActiveModel {
        name: Set(name.trim().to_string()),
        order_name: Set(order_name),
        divisor: Set(divisor),
        ..Default::default()
    };
    unit.insert(db).await.map_err(Into::into)
}
