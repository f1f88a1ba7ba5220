use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entities::products::Product;

/// No transition rules apply; any status may follow any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub status: OrderStatus,
    pub order_date: DateTime<Utc>,
    pub shipped_date: Option<DateTime<Utc>>,
    pub delivered_date: Option<DateTime<Utc>>,
    /// Always recomputed from the order's line items at creation; never
    /// taken from caller input.
    pub total_amount: Decimal,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
}

impl Order {
    /// Time-derived order number in the `ORD-YYYY-NNNNNN` shape. Uniqueness
    /// is expected but not enforced anywhere.
    pub fn generate_order_number() -> String {
        let now = Utc::now();
        let millis = now.timestamp_millis().to_string();
        let suffix = &millis[millis.len().saturating_sub(6)..];
        format!("ORD-{}-{}", now.format("%Y"), suffix)
    }
}

/// One product line within an order. `unit_price` is snapshotted from the
/// product at the moment the order is placed and never tracks later price
/// changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

/// Form input for placing an order. Line entries travel separately as
/// `(product_id, quantity)` pairs; prices are never part of the input.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    pub order_number: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// A line in an order under composition, before submission.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DraftLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl DraftLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The order-composition workflow: a running cart the caller fills before
/// handing the lines to `WarehouseEngine::place_order`.
#[derive(Clone, Debug, Default)]
pub struct OrderComposer {
    lines: Vec<DraftLine>,
}

impl OrderComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of the product. A product already in the cart gets its
    /// quantity bumped instead of a duplicate line.
    pub fn add_product(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(DraftLine {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                quantity: 1,
                unit_price: product.unit_price,
            });
        }
    }

    /// Sets a line's quantity; zero or negative removes the line.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.lines.retain(|l| l.product_id != product_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(DraftLine::line_total).sum()
    }

    /// The `(product_id, quantity)` pairs `place_order` consumes.
    pub fn entries(&self) -> Vec<(String, i64)> {
        self.lines
            .iter()
            .map(|l| (l.product_id.clone(), l.quantity))
            .collect()
    }
}
