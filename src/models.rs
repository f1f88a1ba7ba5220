use serde::Serialize;

use crate::entities::orders::Order;
use crate::entities::products::Product;
use crate::stats::DashboardStats;

/// Broadcast after every committed mutation. `StatsRecomputed` always
/// follows the entity event so subscribers can re-render from fresh
/// derived numbers without recomputing themselves.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum WarehouseEvent {
    ProductCreated(Product),
    ProductUpdated(Product),
    OrderCreated(Order),
    StatsRecomputed(DashboardStats),
}
