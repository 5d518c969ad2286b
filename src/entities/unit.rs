//! Unit entity - Represents the measurement unit a product is priced in.
//!
//! A unit distinguishes the name used for the price from the name used for
//! the order: a product can be priced per kilogram but ordered in grams. The
//! `divisor` converts between the two (1000 in the kilogram/gram case).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unit database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "units")]
pub struct Model {
    /// Unique identifier for the unit
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the unit as used for the price (e.g., "Kilo", "Liter")
    #[sea_orm(unique)]
    pub name: String,
    /// Name of the unit as used for an order, when it differs (e.g., "Gram")
    pub order_name: Option<String>,
    /// Converts a price per unit into a price per order increment
    pub divisor: i64,
}

impl Model {
    /// Display label for a price, always the unit's own name.
    #[must_use]
    pub fn price_label(&self) -> &str {
        &self.name
    }

    /// Display label for an order quantity: `order_name` when set, else `name`.
    #[must_use]
    pub fn order_label(&self) -> &str {
        self.order_name.as_deref().unwrap_or(&self.name)
    }
}

/// Defines relationships between Unit and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One unit is referenced by many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
