//! Bundle business logic - lifecycle and the pricing aggregation engine.
//!
//! A bundle collects every group's orders over one ordering period. While it
//! is open, amounts may change; closing it freezes the ordering phase, after
//! which only delivered quantities are written. The pricing functions here
//! differentiate between the ordered and the delivered view of the same
//! orders: `use_delivered` selects which quantity a sum is computed from.
//!
//! Sums are exact decimals and never rounded here; formatting to two places
//! happens at the presentation boundary.

use std::collections::HashMap;

use crate::{
    entities::{Bundle, Order, Product, Unit, bundle, order, product, unit},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};

/// An order joined with its product and the product's unit, ready to price.
#[derive(Debug, Clone)]
pub(crate) struct PricedOrder {
    /// The raw order row
    pub order: order::Model,
    /// The ordered product
    pub product: product::Model,
    /// The unit the product is priced in
    pub unit: unit::Model,
}

impl PricedOrder {
    /// Currency amount per order increment of this order's product.
    pub fn multiplier(&self) -> Decimal {
        self.product.multiplier(&self.unit)
    }

    /// The quantity a sum should use: the delivered view falls back to the
    /// ordered amount when nothing was recorded yet.
    pub const fn quantity(&self, use_delivered: bool) -> i64 {
        if use_delivered {
            self.order.effective_delivered()
        } else {
            self.order.amount
        }
    }

    /// Cost of this order under the selected quantity view.
    pub fn cost(&self, use_delivered: bool) -> Decimal {
        self.multiplier() * Decimal::from(self.quantity(use_delivered))
    }
}

/// Loads a bundle's orders joined with product and unit data, optionally
/// restricted to one group.
pub(crate) async fn load_priced_orders(
    db: &DatabaseConnection,
    bundle_id: i64,
    group_id: Option<i64>,
) -> Result<Vec<PricedOrder>> {
    let mut query = Order::find().filter(order::Column::BundleId.eq(bundle_id));
    if let Some(group_id) = group_id {
        query = query.filter(order::Column::GroupId.eq(group_id));
    }
    let orders = query.all(db).await?;

    let products: HashMap<i64, (product::Model, unit::Model)> = Product::find()
        .find_also_related(Unit)
        .all(db)
        .await?
        .into_iter()
        .filter_map(|(product, unit)| unit.map(|unit| (product.id, (product, unit))))
        .collect();

    orders
        .into_iter()
        .map(|order| {
            let (product, unit) = products
                .get(&order.product_id)
                .cloned()
                .ok_or_else(|| Error::ProductNotFound {
                    name: order.product_id.to_string(),
                })?;
            Ok(PricedOrder {
                order,
                product,
                unit,
            })
        })
        .collect()
}

/// Creates a new, empty, open bundle starting now.
pub async fn create_bundle(db: &DatabaseConnection) -> Result<bundle::Model> {
    let bundle = bundle::ActiveModel {
        start: Set(chrono::Utc::now()),
        open: Set(true),
        ..Default::default()
    };
    bundle.insert(db).await.map_err(Into::into)
}

/// Retrieves a specific bundle by its unique ID.
pub async fn get_bundle_by_id(
    db: &DatabaseConnection,
    bundle_id: i64,
) -> Result<Option<bundle::Model>> {
    Bundle::find_by_id(bundle_id).one(db).await.map_err(Into::into)
}

/// Retrieves all bundles, newest first.
pub async fn get_all_bundles(db: &DatabaseConnection) -> Result<Vec<bundle::Model>> {
    Bundle::find()
        .order_by_desc(bundle::Column::Start)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The most recently started bundle, or None if none exists yet.
pub async fn latest_bundle(db: &DatabaseConnection) -> Result<Option<bundle::Model>> {
    Bundle::find()
        .order_by_desc(bundle::Column::Start)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Opens or closes a bundle for ordering.
///
/// Closing is how an ordering period ends; the symmetric reopen exists for
/// corrections. Delivered quantities are writable in either state.
///
/// # Errors
/// Returns [`Error::BundleNotFound`] if the bundle does not exist.
pub async fn set_bundle_open(
    db: &DatabaseConnection,
    bundle_id: i64,
    open: bool,
) -> Result<bundle::Model> {
    let mut bundle: bundle::ActiveModel = Bundle::find_by_id(bundle_id)
        .one(db)
        .await?
        .ok_or(Error::BundleNotFound { id: bundle_id })?
        .into();

    bundle.open = Set(open);
    bundle.update(db).await.map_err(Into::into)
}

/// Deletes a bundle together with all orders recorded against it.
///
/// # Errors
/// Returns [`Error::BundleNotFound`] if the bundle does not exist.
pub async fn delete_bundle(db: &DatabaseConnection, bundle_id: i64) -> Result<()> {
    let result = Bundle::delete_by_id(bundle_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::BundleNotFound { id: bundle_id });
    }
    Ok(())
}

/// Returns the full price of one group's orders in a bundle.
///
/// With `use_delivered` false this is the price of what the group asked for;
/// with true it is the price the group has to pay, computed from delivered
/// quantities (falling back to the ordered amount where no delivery was
/// recorded). Zero if the group has no orders in the bundle. Orders for
/// unpriced products contribute nothing - run [`has_unknown_price`] before
/// treating the result as a bill.
pub async fn price_for_group(
    db: &DatabaseConnection,
    bundle_id: i64,
    group_id: i64,
    use_delivered: bool,
) -> Result<Decimal> {
    let orders = load_priced_orders(db, bundle_id, Some(group_id)).await?;
    Ok(orders.iter().map(|order| order.cost(use_delivered)).sum())
}

/// Returns the price of a bundle across all groups.
///
/// Equals the sum of [`price_for_group`] over every group with orders in the
/// bundle. For the `use_delivered` flag, see [`price_for_group`].
pub async fn price_for_all(
    db: &DatabaseConnection,
    bundle_id: i64,
    use_delivered: bool,
) -> Result<Decimal> {
    let orders = load_priced_orders(db, bundle_id, None).await?;
    Ok(orders.iter().map(|order| order.cost(use_delivered)).sum())
}

/// Whether the bundle contains a relevant order for a product without a price.
///
/// Relevant means the order's quantity under the selected view is strictly
/// positive; a group that ordered zero of an unpriced product is not
/// affected by its missing price. With `group_id` set, only that group's
/// orders are considered. Callers must consult this before trusting
/// [`price_for_group`] or [`price_for_all`] for billing, since both silently
/// zero out unpriced contributions.
pub async fn has_unknown_price(
    db: &DatabaseConnection,
    bundle_id: i64,
    group_id: Option<i64>,
    use_delivered: bool,
) -> Result<bool> {
    let orders = load_priced_orders(db, bundle_id, group_id).await?;
    Ok(orders
        .iter()
        .any(|order| order.product.price.is_none() && order.quantity(use_delivered) > 0))
}
