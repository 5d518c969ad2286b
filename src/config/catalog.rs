//! Seed catalog loading from config.toml
//!
//! This module provides functionality to load an initial catalog of units,
//! products, and groups from a TOML configuration file. The catalog defined
//! in config.toml is used to seed the database on first run or when entries
//! are missing; seeding is idempotent and matches existing rows by name.

use crate::core;
use crate::errors::{Error, Result};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Catalog {
    /// Measurement units to seed
    #[serde(default)]
    pub units: Vec<UnitSeed>,
    /// Products to seed, referencing units by name
    #[serde(default)]
    pub products: Vec<ProductSeed>,
    /// Ordering groups to seed
    #[serde(default)]
    pub groups: Vec<GroupSeed>,
}

/// Configuration for a single unit
#[derive(Debug, Deserialize, Clone)]
pub struct UnitSeed {
    /// Name of the unit as used for the price
    pub name: String,
    /// Name of the unit as used for an order, when it differs
    pub order_name: Option<String>,
    /// Price-unit to order-unit conversion divisor
    #[serde(default = "default_divisor")]
    pub divisor: i64,
}

/// Configuration for a single product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductSeed {
    /// Name of the product
    pub name: String,
    /// Name of the unit the product is priced in
    pub unit: String,
    /// Price per price-unit, omitted when not yet known
    pub price: Option<Decimal>,
    /// Whether the product shows up in the order table
    #[serde(default = "default_available")]
    pub available: bool,
}

/// Configuration for a single group
#[derive(Debug, Deserialize, Clone)]
pub struct GroupSeed {
    /// Name of the group
    pub name: String,
    /// Whether the group has already paid its deposit
    #[serde(default)]
    pub enclosure: bool,
}

const fn default_divisor() -> i64 {
    1
}

const fn default_available() -> bool {
    true
}

/// Loads the seed catalog from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the seed catalog from the default location (./config.toml)
pub fn load_default_catalog() -> Result<Catalog> {
    load_catalog("config.toml")
}

/// Seeds missing catalog entries into the database.
///
/// Entries are matched by name; existing rows are left untouched, so the
/// function can run on every startup. Products referencing an unknown unit
/// fail with [`Error::UnitNotFound`].
pub async fn seed_catalog(db: &DatabaseConnection, catalog: &Catalog) -> Result<()> {
    for unit in &catalog.units {
        if core::unit::get_unit_by_name(db, &unit.name).await?.is_none() {
            core::unit::create_unit(db, unit.name.clone(), unit.order_name.clone(), unit.divisor)
                .await?;
            info!(name = %unit.name, "Seeded unit");
        }
    }

    for product in &catalog.products {
        if core::product::get_product_by_name(db, &product.name)
            .await?
            .is_none()
        {
            let unit = core::unit::get_unit_by_name(db, &product.unit)
                .await?
                .ok_or_else(|| Error::UnitNotFound {
                    name: product.unit.clone(),
                })?;
            core::product::create_product(
                db,
                product.name.clone(),
                unit.id,
                product.price,
                product.available,
            )
            .await?;
            info!(name = %product.name, "Seeded product");
        }
    }

    for group in &catalog.groups {
        if core::group::get_group_by_name(db, &group.name)
            .await?
            .is_none()
        {
            core::group::create_group(db, group.name.clone(), group.enclosure).await?;
            info!(name = %group.name, "Seeded group");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{dec, setup_test_db};

    #[test]
    fn test_parse_catalog() {
        let toml_str = r#"
            [[units]]
            name = "Liter"

            [[units]]
            name = "Kilo"
            order_name = "Gram"
            divisor = 1000

            [[products]]
            name = "milk"
            unit = "Liter"
            price = "1.53"

            [[products]]
            name = "apple"
            unit = "Kilo"
            available = false

            [[groups]]
            name = "My Group"
            enclosure = true
        "#;

        let catalog: Catalog = toml::from_str(toml_str).unwrap();
        assert_eq!(catalog.units.len(), 2);
        assert_eq!(catalog.units[0].name, "Liter");
        assert_eq!(catalog.units[0].divisor, 1);
        assert_eq!(catalog.units[1].order_name.as_deref(), Some("Gram"));
        assert_eq!(catalog.units[1].divisor, 1000);

        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.products[0].price, Some(dec("1.53")));
        assert!(catalog.products[0].available);
        assert_eq!(catalog.products[1].price, None);
        assert!(!catalog.products[1].available);

        assert_eq!(catalog.groups.len(), 1);
        assert!(catalog.groups[0].enclosure);
    }

    #[tokio::test]
    async fn test_seed_catalog_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;

        let catalog: Catalog = toml::from_str(
            r#"
            [[units]]
            name = "Kilo"
            divisor = 1000

            [[products]]
            name = "rice"
            unit = "Kilo"
            price = "0.78"

            [[groups]]
            name = "My Group"
        "#,
        )
        .unwrap();

        seed_catalog(&db, &catalog).await?;
        seed_catalog(&db, &catalog).await?;

        assert_eq!(core::unit::get_all_units(&db).await?.len(), 1);
        assert_eq!(core::group::get_all_groups(&db).await?.len(), 1);
        let rice = core::product::get_product_by_name(&db, "rice").await?.unwrap();
        assert_eq!(rice.price, Some(dec("0.78")));

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_catalog_unknown_unit() -> Result<()> {
        let db = setup_test_db().await?;

        let catalog: Catalog = toml::from_str(
            r#"
            [[products]]
            name = "rice"
            unit = "Nope"
        "#,
        )
        .unwrap();

        let result = seed_catalog(&db, &catalog).await;
        assert!(matches!(result.unwrap_err(), Error::UnitNotFound { name } if name == "Nope"));

        Ok(())
    }
}
