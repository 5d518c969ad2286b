//! Order write paths - recording quantities and deliveries.
//!
//! Order rows are created lazily: the first time a group records an amount
//! or a delivery for a product within a bundle, the unique
//! (group, product, bundle) row comes into existence. Both write paths are
//! single atomic upserts, so the race between two first-writes for the same
//! triple collapses at the storage layer instead of surfacing a duplicate
//! key to the caller. Writes overwrite - repeated calls never accumulate.

use crate::{
    entities::{Bundle, Group, Order, Product, order},
    errors::{Error, Result},
};
use sea_orm::sea_query::OnConflict;
use sea_orm::{Set, prelude::*};
use tracing::debug;

async fn ensure_bundle(db: &DatabaseConnection, bundle_id: i64) -> Result<crate::entities::bundle::Model> {
    Bundle::find_by_id(bundle_id)
        .one(db)
        .await?
        .ok_or(Error::BundleNotFound { id: bundle_id })
}

async fn ensure_group(db: &DatabaseConnection, group_id: i64) -> Result<()> {
    Group::find_by_id(group_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::GroupNotFound {
            name: group_id.to_string(),
        })?;
    Ok(())
}

async fn ensure_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            name: product_id.to_string(),
        })?;
    Ok(())
}

/// Reads the order row for one (group, product, bundle) triple, if any.
pub async fn get_order(
    db: &DatabaseConnection,
    bundle_id: i64,
    group_id: i64,
    product_id: i64,
) -> Result<Option<order::Model>> {
    Order::find()
        .filter(order::Column::BundleId.eq(bundle_id))
        .filter(order::Column::GroupId.eq(group_id))
        .filter(order::Column::ProductId.eq(product_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records the amount a group orders of a product within a bundle.
///
/// Upserts the unique (group, product, bundle) row, setting `amount`; the
/// row is created with no delivered value if it does not exist, and an
/// existing delivered value is left untouched. Last write wins.
///
/// # Errors
/// Returns an error if:
/// - The bundle does not exist ([`Error::BundleNotFound`])
/// - The bundle is closed ([`Error::BundleClosed`])
/// - The group or product does not exist
/// - The amount is negative ([`Error::InvalidAmount`])
pub async fn record_order(
    db: &DatabaseConnection,
    bundle_id: i64,
    group_id: i64,
    product_id: i64,
    amount: i64,
) -> Result<order::Model> {
    if amount < 0 {
        return Err(Error::InvalidAmount { amount });
    }

    let bundle = ensure_bundle(db, bundle_id).await?;
    if !bundle.open {
        return Err(Error::BundleClosed { id: bundle_id });
    }
    ensure_group(db, group_id).await?;
    ensure_product(db, product_id).await?;

    let model = order::ActiveModel {
        group_id: Set(group_id),
        product_id: Set(product_id),
        bundle_id: Set(bundle_id),
        amount: Set(amount),
        ..Default::default()
    };

    let order = Order::insert(model)
        .on_conflict(
            OnConflict::columns([
                order::Column::GroupId,
                order::Column::ProductId,
                order::Column::BundleId,
            ])
            .update_column(order::Column::Amount)
            .to_owned(),
        )
        .exec_with_returning(db)
        .await?;

    debug!(bundle = bundle_id, group = group_id, product = product_id, amount, "Recorded order");
    Ok(order)
}

/// Records the quantity of a product actually delivered to a group.
///
/// Runs during the output phase, after the bundle is closed, so there is no
/// open-state precondition. Upserts the unique (group, product, bundle)
/// row's `delivered` field; a row created by this path starts with an
/// ordered amount of zero. Returns the updated row together with the
/// product's delivered total across all groups in the bundle.
///
/// # Errors
/// Returns an error if:
/// - The bundle, group, or product does not exist
/// - The delivered quantity is negative ([`Error::InvalidAmount`])
pub async fn record_delivery(
    db: &DatabaseConnection,
    bundle_id: i64,
    group_id: i64,
    product_id: i64,
    delivered: i64,
) -> Result<(order::Model, i64)> {
    if delivered < 0 {
        return Err(Error::InvalidAmount { amount: delivered });
    }

    ensure_bundle(db, bundle_id).await?;
    ensure_group(db, group_id).await?;
    ensure_product(db, product_id).await?;

    let model = order::ActiveModel {
        group_id: Set(group_id),
        product_id: Set(product_id),
        bundle_id: Set(bundle_id),
        amount: Set(0),
        delivered: Set(Some(delivered)),
        ..Default::default()
    };

    let order = Order::insert(model)
        .on_conflict(
            OnConflict::columns([
                order::Column::GroupId,
                order::Column::ProductId,
                order::Column::BundleId,
            ])
            .update_column(order::Column::Delivered)
            .to_owned(),
        )
        .exec_with_returning(db)
        .await?;

    let product_delivered = sum_delivered(db, product_id, bundle_id).await?;

    debug!(
        bundle = bundle_id,
        group = group_id,
        product = product_id,
        delivered,
        product_delivered,
        "Recorded delivery"
    );
    Ok((order, product_delivered))
}

/// Sum of the recorded delivered quantities of one product across all groups
/// in a bundle.
///
/// Note: this sums the raw `delivered` column; rows where no delivery was
/// recorded contribute nothing, they do NOT fall back to the ordered amount
/// the way billing sums do. It answers "how much of this product has been
/// handed out so far", which must not count quantities nobody received yet.
pub async fn sum_delivered(
    db: &DatabaseConnection,
    product_id: i64,
    bundle_id: i64,
) -> Result<i64> {
    let orders = Order::find()
        .filter(order::Column::BundleId.eq(bundle_id))
        .filter(order::Column::ProductId.eq(product_id))
        .all(db)
        .await?;

    Ok(orders.iter().filter_map(|order| order.delivered).sum())
}
