//! Product business logic - Handles all product-related operations.
//!
//! This module provides functions for creating, retrieving, and updating the
//! products a bundle can contain. A product may exist without a price - the
//! distributor has not published one yet - in which case it contributes zero
//! to every sum and the unknown-price check flags it. All functions are
//! async and return Result types for proper error handling throughout the
//! system.

use crate::{
    entities::{Product, Unit, product, unit},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all available products, ordered alphabetically by name.
///
/// This is the product list the ordering table is built from; products
/// flagged unavailable are hidden without deleting their order history.
pub async fn get_all_available_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::Available.eq(true))
        .order_by_asc(product::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all available products together with their units, ordered by name.
pub async fn get_all_available_products_with_units(
    db: &DatabaseConnection,
) -> Result<Vec<(product::Model, unit::Model)>> {
    let products = Product::find()
        .filter(product::Column::Available.eq(true))
        .order_by_asc(product::Column::Name)
        .find_also_related(Unit)
        .all(db)
        .await?;

    products
        .into_iter()
        .map(|(product, unit)| {
            let name = product.unit_id.to_string();
            unit.map(|unit| (product, unit))
                .ok_or(Error::UnitNotFound { name })
        })
        .collect()
}

/// Finds a specific product by its name, returning None if not found.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product with the specified parameters, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is set and negative
/// - The referenced unit does not exist
/// - The database insert operation fails
pub async fn create_product(
    db: &DatabaseConnection,
    name: String,
    unit_id: i64,
    price: Option<Decimal>,
    available: bool,
) -> Result<product::Model> {
    // Validate inputs
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if let Some(price) = price {
        if price < Decimal::ZERO {
            return Err(Error::InvalidPrice { price });
        }
    }

    crate::core::unit::get_unit_by_id(db, unit_id)
        .await?
        .ok_or_else(|| Error::UnitNotFound {
            name: unit_id.to_string(),
        })?;

    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        unit_id: Set(unit_id),
        price: Set(price),
        available: Set(available),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Updates an existing product's name and price, performing input validation.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The price is set and negative
/// - The product does not exist
/// - The database update operation fails
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    new_name: String,
    new_price: Option<Decimal>,
) -> Result<product::Model> {
    // Validate inputs
    if new_name.trim().is_empty() {
        return Err(Error::Config {
            message: "Product name cannot be empty".to_string(),
        });
    }

    if let Some(price) = new_price {
        if price < Decimal::ZERO {
            return Err(Error::InvalidPrice { price });
        }
    }

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();

    product.name = Set(new_name.trim().to_string());
    product.price = Set(new_price);

    product.update(db).await.map_err(Into::into)
}

/// Flags a product as available or hides it from the ordering table.
///
/// # Errors
/// Returns [`Error::ProductNotFound`] if the product does not exist.
pub async fn set_available(
    db: &DatabaseConnection,
    product_id: i64,
    available: bool,
) -> Result<product::Model> {
    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?
        .into();

    product.available = Set(available);
    product.update(db).await.map_err(Into::into)
}
