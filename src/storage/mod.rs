use anyhow::Result;
use async_trait::async_trait;

use crate::entities::movements::InventoryMovement;
use crate::entities::orders::{Order, OrderItem};
use crate::entities::products::Product;

/// Backing store for the warehouse collections. Listing operations return
/// records in insertion order; the stable rankings in `stats` depend on it.
#[async_trait]
pub trait WarehouseStore: Send + Sync {
    async fn insert_product(&self, product: Product) -> Result<()>;
    async fn get_product(&self, id: &str) -> Result<Option<Product>>;
    async fn update_product(&self, product: Product) -> Result<()>;
    async fn list_products(&self) -> Result<Vec<Product>>;

    async fn insert_order(&self, order: Order, items: Vec<OrderItem>) -> Result<()>;
    async fn get_order(&self, id: &str) -> Result<Option<Order>>;
    async fn list_orders(&self) -> Result<Vec<Order>>;
    async fn items_for_order(&self, order_id: &str) -> Result<Vec<OrderItem>>;

    async fn record_movement(&self, movement: InventoryMovement) -> Result<()>;
    async fn movements_for_product(&self, product_id: &str) -> Result<Vec<InventoryMovement>>;
}

pub mod memory;

pub use memory::MemoryStore;
