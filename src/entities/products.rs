use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Active,
    Discontinued,
    OutOfStock,
}

impl Default for ProductStatus {
    fn default() -> Self {
        ProductStatus::Active
    }
}

/// A catalog entry with its current stock level. Stock levels carry no
/// `min <= max` relationship; the levels are advisory thresholds only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    pub model: String,
    pub sku: String,
    pub description: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub unit_price: Decimal,
    pub cost_price: Decimal,
    pub stock_quantity: i64,
    pub min_stock_level: i64,
    pub max_stock_level: i64,
    pub location: Option<String>,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock_level
    }

    /// Value of the stock currently on the shelf, at sale price.
    pub fn stock_value(&self) -> Decimal {
        self.unit_price * Decimal::from(self.stock_quantity)
    }
}

/// Form input for creating or editing a product. Identity and audit fields
/// are assigned by the engine, never by the caller.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub brand: String,
    pub model: String,
    pub sku: String,
    pub description: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub unit_price: Decimal,
    pub cost_price: Decimal,
    pub stock_quantity: i64,
    pub min_stock_level: i64,
    pub max_stock_level: i64,
    pub location: Option<String>,
    pub status: ProductStatus,
}

impl ProductDraft {
    /// Applies the draft over an existing record, keeping identity and
    /// creation audit fields intact.
    pub(crate) fn merge_into(self, existing: &Product, now: DateTime<Utc>) -> Product {
        Product {
            id: existing.id.clone(),
            name: self.name,
            category: self.category,
            brand: self.brand,
            model: self.model,
            sku: self.sku,
            description: self.description,
            specifications: self.specifications,
            unit_price: self.unit_price,
            cost_price: self.cost_price,
            stock_quantity: self.stock_quantity,
            min_stock_level: self.min_stock_level,
            max_stock_level: self.max_stock_level,
            location: self.location,
            status: self.status,
            created_at: existing.created_at,
            updated_at: now,
            user_id: existing.user_id.clone(),
        }
    }

    pub(crate) fn into_product(self, id: String, user_id: String, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            brand: self.brand,
            model: self.model,
            sku: self.sku,
            description: self.description,
            specifications: self.specifications,
            unit_price: self.unit_price,
            cost_price: self.cost_price,
            stock_quantity: self.stock_quantity,
            min_stock_level: self.min_stock_level,
            max_stock_level: self.max_stock_level,
            location: self.location,
            status: self.status,
            created_at: now,
            updated_at: now,
            user_id,
        }
    }
}
