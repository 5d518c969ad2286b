//! Order entity - One group's quantity of one product within one bundle.
//!
//! The row is unique per (group, product, bundle) and differentiates the
//! amount ordered from the amount actually delivered. `delivered` should not
//! be read directly for billing; use [`Model::effective_delivered`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The ordering group
    pub group_id: i64,
    /// The ordered product
    pub product_id: i64,
    /// The bundle this order belongs to
    pub bundle_id: i64,
    /// Requested quantity in order increments
    pub amount: i64,
    /// Actually delivered quantity, unset until distribution records it
    pub delivered: Option<i64>,
}

impl Model {
    /// The delivered quantity when recorded, else the ordered amount.
    #[must_use]
    pub const fn effective_delivered(&self) -> i64 {
        match self.delivered {
            Some(delivered) => delivered,
            None => self.amount,
        }
    }
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one group
    #[sea_orm(
        belongs_to = "super::group::Entity",
        from = "Column::GroupId",
        to = "super::group::Column::Id",
        on_delete = "Cascade"
    )]
    Group,
    /// Each order references one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id",
        on_delete = "Cascade"
    )]
    Product,
    /// Each order is owned by one bundle
    #[sea_orm(
        belongs_to = "super::bundle::Entity",
        from = "Column::BundleId",
        to = "super::bundle::Column::Id",
        on_delete = "Cascade"
    )]
    Bundle,
}

impl Related<super::group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::bundle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bundle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
