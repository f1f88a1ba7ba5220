//! Derived views over the product and order collections.
//!
//! Everything here is a pure function of its inputs: no storage access, no
//! side effects, safe to recompute after every mutation and on arbitrary
//! (including empty) collections.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::entities::orders::{Order, OrderStatus};
use crate::entities::products::Product;

/// The headline numbers shown on the dashboard. Empty collections yield a
/// zero-valued record.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_products: usize,
    pub total_orders: usize,
    pub low_stock_items: usize,
    pub total_revenue: Decimal,
    pub pending_orders: usize,
    pub processing_orders: usize,
    pub shipped_orders: usize,
    pub delivered_orders: usize,
}

pub fn dashboard_stats(products: &[Product], orders: &[Order]) -> DashboardStats {
    let count_status = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

    DashboardStats {
        total_products: products.len(),
        total_orders: orders.len(),
        low_stock_items: products.iter().filter(|p| p.is_low_stock()).count(),
        total_revenue: total_revenue(orders),
        pending_orders: count_status(OrderStatus::Pending),
        processing_orders: count_status(OrderStatus::Processing),
        shipped_orders: count_status(OrderStatus::Shipped),
        delivered_orders: count_status(OrderStatus::Delivered),
    }
}

/// Revenue over all orders that were not cancelled.
pub fn total_revenue(orders: &[Order]) -> Decimal {
    orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .map(|o| o.total_amount)
        .sum()
}

pub fn category_breakdown(products: &[Product]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for product in products {
        *counts.entry(product.category.clone()).or_insert(0) += 1;
    }
    counts
}

pub fn status_breakdown(orders: &[Order]) -> HashMap<OrderStatus, usize> {
    let mut counts = HashMap::new();
    for order in orders {
        *counts.entry(order.status).or_insert(0) += 1;
    }
    counts
}

/// Non-cancelled revenue bucketed by calendar month of the order date,
/// keyed `YYYY-MM`.
pub fn revenue_by_month(orders: &[Order]) -> BTreeMap<String, Decimal> {
    let mut buckets = BTreeMap::new();
    for order in orders {
        if order.status == OrderStatus::Cancelled {
            continue;
        }
        let month = order.order_date.format("%Y-%m").to_string();
        *buckets.entry(month).or_insert(Decimal::ZERO) += order.total_amount;
    }
    buckets
}

/// Products ranked by shelf value (`unit_price * stock_quantity`),
/// descending. The sort is stable: ties keep their input order.
pub fn top_value_products(products: &[Product], n: usize) -> Vec<Product> {
    let mut ranked = products.to_vec();
    ranked.sort_by(|a, b| b.stock_value().cmp(&a.stock_value()));
    ranked.truncate(n);
    ranked
}

/// The n most recent orders by order date, stable for identical dates.
pub fn recent_orders(orders: &[Order], n: usize) -> Vec<Order> {
    let mut ranked = orders.to_vec();
    ranked.sort_by(|a, b| b.order_date.cmp(&a.order_date));
    ranked.truncate(n);
    ranked
}

/// Mean `total_amount` over ALL orders, cancelled included. Zero for an
/// empty collection rather than a division error.
pub fn average_order_value(orders: &[Order]) -> Decimal {
    if orders.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = orders.iter().map(|o| o.total_amount).sum();
    sum / Decimal::from(orders.len() as u64)
}
