use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    In,
    Out,
    Adjustment,
}

/// Audit record for a stock-quantity change. The quantity is the requested
/// adjustment, which may exceed what the clamped stock level actually
/// absorbed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub id: String,
    pub product_id: String,
    pub movement_type: MovementType,
    pub quantity: i64,
    pub reference_type: Option<String>,
    pub reference_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}
