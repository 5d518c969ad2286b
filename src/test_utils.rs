//! Shared test utilities for `FoodOrder`.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults, plus the
//! standard two-group milk/rice bundle most pricing tests run against.

use crate::{
    core::{bundle, group, order, product, unit},
    entities,
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Parses a decimal literal in tests.
///
/// # Panics
/// Panics on an unparsable literal; test input is written by hand.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

/// Creates a test unit with divisor 1 and no separate order name.
pub async fn create_test_unit(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::unit::Model> {
    unit::create_unit(db, name.to_string(), None, 1).await
}

/// Creates a test unit with custom order name and divisor.
pub async fn create_custom_unit(
    db: &DatabaseConnection,
    name: &str,
    order_name: Option<&str>,
    divisor: i64,
) -> Result<entities::unit::Model> {
    unit::create_unit(
        db,
        name.to_string(),
        order_name.map(ToString::to_string),
        divisor,
    )
    .await
}

/// Creates a test group that has already paid its enclosure.
pub async fn create_test_group(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::group::Model> {
    group::create_group(db, name.to_string(), true).await
}

/// Creates an available test product; pass None for an unpriced product.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    unit_id: i64,
    price: Option<&str>,
) -> Result<entities::product::Model> {
    product::create_product(db, name.to_string(), unit_id, price.map(dec), true).await
}

/// The standard pricing fixture: two groups ordering milk and rice, with
/// rice partially delivered.
#[derive(Debug)]
pub struct BundleFixture {
    /// The open bundle holding all four orders
    pub bundle: entities::bundle::Model,
    /// Group "My Group": 3 milk, 800 rice (500 delivered)
    pub me: entities::group::Model,
    /// Group "Other Group": 4 milk, 1800 rice (1500 delivered)
    pub other: entities::group::Model,
    /// Milk, 1.53 per liter
    pub milk: entities::product::Model,
    /// Rice, 0.78 per kilogram ordered in grams
    pub rice: entities::product::Model,
    /// Liter unit, divisor 1
    pub liter: entities::unit::Model,
    /// Kilo unit, ordered in grams, divisor 1000
    pub kilo: entities::unit::Model,
}

/// Sets up a database with the standard pricing fixture.
pub async fn setup_bundle_fixture() -> Result<(DatabaseConnection, BundleFixture)> {
    let db = setup_test_db().await?;

    let me = create_test_group(&db, "My Group").await?;
    let other = create_test_group(&db, "Other Group").await?;
    let liter = create_test_unit(&db, "Liter").await?;
    let kilo = create_custom_unit(&db, "Kilo", Some("Gram"), 1000).await?;
    let milk = create_test_product(&db, "milk", liter.id, Some("1.53")).await?;
    let rice = create_test_product(&db, "rice", kilo.id, Some("0.78")).await?;
    let bundle = bundle::create_bundle(&db).await?;

    order::record_order(&db, bundle.id, me.id, milk.id, 3).await?;
    order::record_order(&db, bundle.id, me.id, rice.id, 800).await?;
    order::record_delivery(&db, bundle.id, me.id, rice.id, 500).await?;
    order::record_order(&db, bundle.id, other.id, milk.id, 4).await?;
    order::record_order(&db, bundle.id, other.id, rice.id, 1800).await?;
    order::record_delivery(&db, bundle.id, other.id, rice.id, 1500).await?;

    let fixture = BundleFixture {
        bundle,
        me,
        other,
        milk,
        rice,
        liter,
        kilo,
    };
    Ok((db, fixture))
}
