//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary
//! tables based on the entity definitions. The module uses `SeaORM`'s
//! `Schema::create_table_from_entity` method to generate SQL statements from the entity
//! models; the one constraint that cannot be derived from an entity - the composite
//! uniqueness of an order's (group, product, bundle) triple - is created as an explicit
//! index alongside the tables.

use crate::entities::{Bundle, Group, Order, Product, Unit, order};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/food_order.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL`
/// environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from
/// entity definitions.
///
/// Tables are created in dependency order (units and groups before products,
/// products and bundles before orders). Statements are `IF NOT EXISTS` so the
/// function is safe to run against an already-provisioned database. The unique
/// index on (`group_id`, `product_id`, `bundle_id`) is the storage-level guard
/// against two concurrent first-writes creating duplicate order rows.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut unit_table = schema.create_table_from_entity(Unit);
    let mut group_table = schema.create_table_from_entity(Group);
    let mut product_table = schema.create_table_from_entity(Product);
    let mut bundle_table = schema.create_table_from_entity(Bundle);
    let mut order_table = schema.create_table_from_entity(Order);

    db.execute(builder.build(unit_table.if_not_exists())).await?;
    db.execute(builder.build(group_table.if_not_exists())).await?;
    db.execute(builder.build(product_table.if_not_exists())).await?;
    db.execute(builder.build(bundle_table.if_not_exists())).await?;
    db.execute(builder.build(order_table.if_not_exists())).await?;

    let order_unique = Index::create()
        .if_not_exists()
        .name("uq_orders_group_product_bundle")
        .table(Order)
        .col(order::Column::GroupId)
        .col(order::Column::ProductId)
        .col(order::Column::BundleId)
        .unique()
        .to_owned();
    db.execute(builder.build(&order_unique)).await?;

    Ok(())
}
