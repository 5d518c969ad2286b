//! Bundle entity - A time-boxed collection of orders from all groups.
//!
//! A bundle starts open; while open, groups may change their order amounts.
//! Closing flips `open` to false and freezes the ordering phase. Delivered
//! quantities are still recorded afterwards during distribution.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Bundle database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bundles")]
pub struct Model {
    /// Unique identifier for the bundle
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the bundle was created, sort key for bundle listings
    pub start: DateTimeUtc,
    /// Whether order amounts may still be changed
    pub open: bool,
}

/// Defines relationships between Bundle and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One bundle owns many orders; they are deleted with it
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
