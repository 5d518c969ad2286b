//! Product entity - Represents a purchasable item, priced per unit.
//!
//! A product without a price is allowed; its contribution to every sum is
//! zero, and the unknown-price check exists so callers never mistake that
//! for "free".

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "milk", "rice"), sort key for listings
    #[sea_orm(unique)]
    pub name: String,
    /// ID of the unit this product is priced in
    pub unit_id: i64,
    /// Price of one price-unit of the product, unset when unknown
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub price: Option<Decimal>,
    /// Whether the product is currently offered in the order table
    pub available: bool,
}

impl Model {
    /// Currency amount charged per one order increment.
    ///
    /// For a price of 1 EUR per kilogram ordered in grams (divisor 1000)
    /// this is 0.001. A product without a price multiplies to zero; use
    /// the unknown-price check before billing to catch that case.
    #[must_use]
    pub fn multiplier(&self, unit: &super::unit::Model) -> Decimal {
        match self.price {
            Some(price) => price / Decimal::from(unit.divisor),
            None => Decimal::ZERO,
        }
    }
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product is priced in one unit
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitId",
        to = "super::unit::Column::Id"
    )]
    Unit,
    /// One product appears in many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
