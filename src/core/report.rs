//! Report generation business logic.
//!
//! This module builds the two reconciliation views of a bundle: the
//! ordering-phase summary (what to order from the distributor, grouped by
//! product) and the output-phase summary (who gets charged what after
//! delivery, grouped by group). All functions return structured data that
//! the presentation layer formats; the only formatting helper here is the
//! two-decimal price display used at that boundary.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::{
    core::bundle::load_priced_orders,
    entities::{Group, group, order, product, unit},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::prelude::*;

/// One product's line in the ordering-phase summary.
#[derive(Debug, Clone)]
pub struct OrderSummaryLine {
    /// The product to order
    pub product: product::Model,
    /// The unit the product is ordered in
    pub unit: unit::Model,
    /// Total amount ordered across all groups
    pub total_amount: i64,
    /// Price of that total at the product's multiplier
    pub order_price: Decimal,
}

/// Ordering-phase summary: what to order from the distributor.
#[derive(Debug, Clone)]
pub struct OrderSummary {
    /// Per-product lines, ascending by product name
    pub lines: Vec<OrderSummaryLine>,
    /// Sum of all line prices
    pub order_price_total: Decimal,
}

/// One group's slice of the output-phase summary.
#[derive(Debug, Clone)]
pub struct GroupOutput {
    /// The group being charged
    pub group: group::Model,
    /// The group's order rows, keyed by product id
    pub orders: HashMap<i64, order::Model>,
    /// What the group owes, from delivered quantities
    pub total_cost: Decimal,
}

/// One product's delivered total in the output-phase summary.
#[derive(Debug, Clone)]
pub struct DeliveredLine {
    /// The delivered product
    pub product: product::Model,
    /// The unit the product is ordered in
    pub unit: unit::Model,
    /// Total delivered across all groups, ordered amounts standing in where
    /// no delivery was recorded
    pub total_delivered: i64,
}

/// Output-phase summary: who gets charged what after delivery.
#[derive(Debug, Clone)]
pub struct OutputSummary {
    /// Per-group slices, ascending by group name; groups without orders are
    /// absent rather than listed with zero
    pub groups: Vec<GroupOutput>,
    /// Per-product delivered totals, ascending by product name
    pub delivered: Vec<DeliveredLine>,
    /// Sum of all group costs
    pub grand_total: Decimal,
}

/// Builds the ordering-phase summary for a bundle.
///
/// Orders are grouped by product and their amounts summed across groups.
/// Products nobody ordered (summed amount of zero) are excluded, even when
/// individual zero-amount rows exist for them. Lines are sorted ascending by
/// product name, the same ordering the product catalog uses.
pub async fn order_summary(db: &DatabaseConnection, bundle_id: i64) -> Result<OrderSummary> {
    let orders = load_priced_orders(db, bundle_id, None).await?;

    let mut by_product: HashMap<i64, (product::Model, unit::Model, i64)> = HashMap::new();
    for priced in orders {
        let entry = by_product
            .entry(priced.product.id)
            .or_insert_with(|| (priced.product.clone(), priced.unit.clone(), 0));
        entry.2 += priced.order.amount;
    }

    let mut lines: Vec<OrderSummaryLine> = by_product
        .into_values()
        .filter(|(_, _, total_amount)| *total_amount > 0)
        .map(|(product, unit, total_amount)| {
            let order_price = product.multiplier(&unit) * Decimal::from(total_amount);
            OrderSummaryLine {
                product,
                unit,
                total_amount,
                order_price,
            }
        })
        .collect();
    lines.sort_by(|a, b| a.product.name.cmp(&b.product.name));

    let order_price_total = lines.iter().map(|line| line.order_price).sum();

    Ok(OrderSummary {
        lines,
        order_price_total,
    })
}

/// Builds the output-phase summary for a bundle.
///
/// Iterates the bundle's orders once, recording each under its group and
/// accumulating the group's cost from delivered quantities (ordered amounts
/// standing in where no delivery was recorded). The per-product delivered
/// totals mirror the ordering-phase exclusion rule: a product whose ordered
/// amount sums to zero is excluded even if something was delivered for it.
pub async fn output_summary(db: &DatabaseConnection, bundle_id: i64) -> Result<OutputSummary> {
    let orders = load_priced_orders(db, bundle_id, None).await?;

    let groups_by_id: HashMap<i64, group::Model> = Group::find()
        .all(db)
        .await?
        .into_iter()
        .map(|group| (group.id, group))
        .collect();

    let mut group_outputs: HashMap<i64, GroupOutput> = HashMap::new();
    let mut by_product: HashMap<i64, (product::Model, unit::Model, i64, i64)> = HashMap::new();

    for priced in &orders {
        let group_id = priced.order.group_id;
        let entry = match group_outputs.entry(group_id) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let group = groups_by_id
                    .get(&group_id)
                    .cloned()
                    .ok_or_else(|| Error::GroupNotFound {
                        name: group_id.to_string(),
                    })?;
                vacant.insert(GroupOutput {
                    group,
                    orders: HashMap::new(),
                    total_cost: Decimal::ZERO,
                })
            }
        };
        entry.orders.insert(priced.product.id, priced.order.clone());
        entry.total_cost += priced.cost(true);

        let product_entry = by_product
            .entry(priced.product.id)
            .or_insert_with(|| (priced.product.clone(), priced.unit.clone(), 0, 0));
        product_entry.2 += priced.order.effective_delivered();
        product_entry.3 += priced.order.amount;
    }

    let mut groups: Vec<GroupOutput> = group_outputs.into_values().collect();
    groups.sort_by(|a, b| a.group.name.cmp(&b.group.name));

    let grand_total = groups.iter().map(|output| output.total_cost).sum();

    let mut delivered: Vec<DeliveredLine> = by_product
        .into_values()
        .filter(|(_, _, _, total_ordered)| *total_ordered > 0)
        .map(|(product, unit, total_delivered, _)| DeliveredLine {
            product,
            unit,
            total_delivered,
        })
        .collect();
    delivered.sort_by(|a, b| a.product.name.cmp(&b.product.name));

    Ok(OutputSummary {
        groups,
        delivered,
        grand_total,
    })
}

/// Formats a price for display with two decimal places.
///
/// Aggregation keeps full precision; this is the presentation boundary.
#[must_use]
pub fn format_price(price: Decimal) -> String {
    format!("{price:.2}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::order::{record_delivery, record_order};
    use crate::test_utils::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec("5.214")), "5.21");
        assert_eq!(format_price(dec("12.738")), "12.74");
        assert_eq!(format_price(dec("4.98")), "4.98");
        assert_eq!(format_price(Decimal::ZERO), "0.00");
    }

    #[tokio::test]
    async fn test_order_summary_totals() -> Result<()> {
        let (db, fixture) = setup_bundle_fixture().await?;

        let summary = order_summary(&db, fixture.bundle.id).await?;

        assert_eq!(summary.lines.len(), 2);

        // Ascending by product name: milk before rice
        assert_eq!(summary.lines[0].product.name, "milk");
        assert_eq!(summary.lines[0].total_amount, 3 + 4);
        assert_eq!(summary.lines[0].order_price, dec("10.71"));

        assert_eq!(summary.lines[1].product.name, "rice");
        assert_eq!(summary.lines[1].total_amount, 800 + 1800);
        assert_eq!(summary.lines[1].order_price, dec("2.028"));

        assert_eq!(summary.order_price_total, dec("12.738"));

        Ok(())
    }

    #[tokio::test]
    async fn test_order_summary_empty_bundle() -> Result<()> {
        let db = setup_test_db().await?;
        let bundle = crate::core::bundle::create_bundle(&db).await?;

        let summary = order_summary(&db, bundle.id).await?;
        assert!(summary.lines.is_empty());
        assert_eq!(summary.order_price_total, Decimal::ZERO);

        Ok(())
    }

    #[tokio::test]
    async fn test_order_summary_excludes_zero_amount_products() -> Result<()> {
        let (db, fixture) = setup_bundle_fixture().await?;
        let liter = fixture.liter;
        let juice = create_test_product(&db, "juice", liter.id, Some("2.10")).await?;

        // A row exists for juice, but with amount zero
        record_order(&db, fixture.bundle.id, fixture.me.id, juice.id, 0).await?;

        let summary = order_summary(&db, fixture.bundle.id).await?;
        assert!(summary.lines.iter().all(|line| line.product.name != "juice"));
        assert_eq!(summary.lines.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_output_summary_group_totals() -> Result<()> {
        let (db, fixture) = setup_bundle_fixture().await?;

        let summary = output_summary(&db, fixture.bundle.id).await?;

        // Ascending by group name: "My Group" before "Other Group"
        assert_eq!(summary.groups.len(), 2);
        assert_eq!(summary.groups[0].group.name, "My Group");
        assert_eq!(summary.groups[0].total_cost, dec("4.98"));
        assert_eq!(summary.groups[1].group.name, "Other Group");
        assert_eq!(summary.groups[1].total_cost, dec("7.29"));

        assert_eq!(summary.grand_total, dec("12.27"));
        assert_eq!(format_price(summary.grand_total), "12.27");

        Ok(())
    }

    #[tokio::test]
    async fn test_output_summary_group_order_maps() -> Result<()> {
        let (db, fixture) = setup_bundle_fixture().await?;

        let summary = output_summary(&db, fixture.bundle.id).await?;

        let me = &summary.groups[0];
        assert_eq!(me.orders.len(), 2);
        assert_eq!(me.orders[&fixture.milk.id].amount, 3);
        assert_eq!(me.orders[&fixture.milk.id].delivered, None);
        assert_eq!(me.orders[&fixture.rice.id].delivered, Some(500));

        Ok(())
    }

    #[tokio::test]
    async fn test_output_summary_delivered_totals() -> Result<()> {
        let (db, fixture) = setup_bundle_fixture().await?;

        let summary = output_summary(&db, fixture.bundle.id).await?;

        assert_eq!(summary.delivered.len(), 2);
        // Milk has no recorded deliveries, so the ordered amounts stand in
        assert_eq!(summary.delivered[0].product.name, "milk");
        assert_eq!(summary.delivered[0].total_delivered, 3 + 4);
        assert_eq!(summary.delivered[1].product.name, "rice");
        assert_eq!(summary.delivered[1].total_delivered, 500 + 1500);

        Ok(())
    }

    #[tokio::test]
    async fn test_output_summary_omits_groups_without_orders() -> Result<()> {
        let (db, fixture) = setup_bundle_fixture().await?;
        create_test_group(&db, "Idle Group").await?;

        let summary = output_summary(&db, fixture.bundle.id).await?;

        assert!(summary.groups.iter().all(|output| output.group.name != "Idle Group"));

        Ok(())
    }

    #[tokio::test]
    async fn test_output_summary_exclusion_follows_ordered_amounts() -> Result<()> {
        let (db, fixture) = setup_bundle_fixture().await?;
        let juice = create_test_product(&db, "juice", fixture.liter.id, Some("2.10")).await?;

        // Delivered without ever being ordered: excluded from the delivered
        // listing, but still charged to the group that received it
        record_delivery(&db, fixture.bundle.id, fixture.me.id, juice.id, 2).await?;

        let summary = output_summary(&db, fixture.bundle.id).await?;
        assert!(summary.delivered.iter().all(|line| line.product.name != "juice"));
        assert_eq!(summary.groups[0].total_cost, dec("4.98") + dec("4.20"));

        Ok(())
    }

    #[tokio::test]
    async fn test_output_summary_empty_bundle() -> Result<()> {
        let db = setup_test_db().await?;
        let bundle = crate::core::bundle::create_bundle(&db).await?;

        let summary = output_summary(&db, bundle.id).await?;
        assert!(summary.groups.is_empty());
        assert!(summary.delivered.is_empty());
        assert_eq!(summary.grand_total, Decimal::ZERO);

        Ok(())
    }
}
