use anyhow::{bail, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use indexmap::IndexMap;
use std::sync::RwLock;

use crate::entities::movements::InventoryMovement;
use crate::entities::orders::{Order, OrderItem};
use crate::entities::products::Product;
use crate::storage::WarehouseStore;

/// In-memory store. Products and orders sit in insertion-ordered maps; line
/// items and movements are grouped by their owning order/product.
#[derive(Default)]
pub struct MemoryStore {
    products: RwLock<IndexMap<String, Product>>,
    orders: RwLock<IndexMap<String, Order>>,
    items_by_order: DashMap<String, Vec<OrderItem>>,
    movements_by_product: DashMap<String, Vec<InventoryMovement>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WarehouseStore for MemoryStore {
    async fn insert_product(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().unwrap();
        products.insert(product.id.clone(), product);
        Ok(())
    }

    async fn get_product(&self, id: &str) -> Result<Option<Product>> {
        let products = self.products.read().unwrap();
        Ok(products.get(id).cloned())
    }

    async fn update_product(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().unwrap();
        match products.get_mut(&product.id) {
            Some(existing) => {
                *existing = product;
                Ok(())
            }
            None => bail!("no product with id {}", product.id),
        }
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let products = self.products.read().unwrap();
        Ok(products.values().cloned().collect())
    }

    async fn insert_order(&self, order: Order, items: Vec<OrderItem>) -> Result<()> {
        let mut orders = self.orders.write().unwrap();
        self.items_by_order.insert(order.id.clone(), items);
        orders.insert(order.id.clone(), order);
        Ok(())
    }

    async fn get_order(&self, id: &str) -> Result<Option<Order>> {
        let orders = self.orders.read().unwrap();
        Ok(orders.get(id).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let orders = self.orders.read().unwrap();
        Ok(orders.values().cloned().collect())
    }

    async fn items_for_order(&self, order_id: &str) -> Result<Vec<OrderItem>> {
        Ok(self
            .items_by_order
            .get(order_id)
            .map(|items| items.clone())
            .unwrap_or_default())
    }

    async fn record_movement(&self, movement: InventoryMovement) -> Result<()> {
        self.movements_by_product
            .entry(movement.product_id.clone())
            .or_default()
            .push(movement);
        Ok(())
    }

    async fn movements_for_product(&self, product_id: &str) -> Result<Vec<InventoryMovement>> {
        Ok(self
            .movements_by_product
            .get(product_id)
            .map(|movements| movements.clone())
            .unwrap_or_default())
    }
}
