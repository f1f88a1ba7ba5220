pub mod entities;
pub mod error;
mod models;
pub mod seed;
pub mod stats;
pub mod storage;

pub use error::{ValidationError, WarehouseError};
pub use models::WarehouseEvent;

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::info;

use crate::entities::movements::{InventoryMovement, MovementType};
use crate::entities::orders::{Order, OrderDraft, OrderItem, OrderStatus};
use crate::entities::prefixed_id;
use crate::entities::products::{Product, ProductDraft};
use crate::stats::DashboardStats;
use crate::storage::WarehouseStore;

/// Owner stamped onto records created through the engine. The field is a
/// weak reference used for display only.
const SYSTEM_USER: &str = "system";

/// How many entries the top-products and recent-orders views return.
const TOP_N: usize = 5;

/// The warehouse session: one store, one logical writer, and a broadcast
/// channel the presentation side subscribes to. Every committed mutation is
/// followed by a `StatsRecomputed` event carrying fresh dashboard numbers.
pub struct WarehouseEngine<S: WarehouseStore> {
    store: S,
    event_tx: broadcast::Sender<WarehouseEvent>,
}

impl<S: WarehouseStore> WarehouseEngine<S> {
    pub fn new(store: S) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self { store, event_tx }
    }

    pub fn subscribe(&self) -> BroadcastStream<WarehouseEvent> {
        BroadcastStream::new(self.event_tx.subscribe())
    }

    // ---- mutations ----

    /// Validates and appends a new product with fresh identity and audit
    /// fields. A failed validation leaves the collection untouched.
    pub async fn add_product(&self, draft: ProductDraft) -> Result<Product, WarehouseError> {
        validate_product(&draft)?;

        let product = draft.into_product(prefixed_id("prod"), SYSTEM_USER.to_string(), Utc::now());
        self.store.insert_product(product.clone()).await?;
        info!(id = %product.id, sku = %product.sku, "product added");

        let _ = self
            .event_tx
            .send(WarehouseEvent::ProductCreated(product.clone()));
        self.refresh_stats().await?;
        Ok(product)
    }

    /// Merges the draft over an existing product. Identity, `created_at`,
    /// and ownership survive the edit; `updated_at` is refreshed.
    pub async fn update_product(
        &self,
        id: &str,
        draft: ProductDraft,
    ) -> Result<Product, WarehouseError> {
        validate_product(&draft)?;

        let existing = self
            .store
            .get_product(id)
            .await?
            .ok_or_else(|| WarehouseError::ProductNotFound(id.to_string()))?;

        let product = draft.merge_into(&existing, Utc::now());
        self.store.update_product(product.clone()).await?;
        info!(id = %product.id, "product updated");

        let _ = self
            .event_tx
            .send(WarehouseEvent::ProductUpdated(product.clone()));
        self.refresh_stats().await?;
        Ok(product)
    }

    /// Places an order from a draft and `(product_id, quantity)` line
    /// entries. Unit prices are snapshotted from the current products and
    /// the order total is the sum of line totals; nothing about money comes
    /// from the caller. Stock decrements clamp at zero without error.
    ///
    /// Every line is resolved before any state changes, so a rejected order
    /// mutates nothing.
    pub async fn place_order(
        &self,
        draft: OrderDraft,
        entries: &[(String, i64)],
    ) -> Result<Order, WarehouseError> {
        validate_order(&draft, entries)?;

        let mut resolved = Vec::with_capacity(entries.len());
        for (product_id, quantity) in entries {
            let product = self
                .store
                .get_product(product_id)
                .await?
                .ok_or_else(|| WarehouseError::ProductNotFound(product_id.clone()))?;
            resolved.push((product, *quantity));
        }

        let now = Utc::now();
        let order_id = prefixed_id("order");

        let items: Vec<OrderItem> = resolved
            .iter()
            .map(|(product, quantity)| OrderItem {
                id: prefixed_id("item"),
                order_id: order_id.clone(),
                product_id: product.id.clone(),
                quantity: *quantity,
                unit_price: product.unit_price,
                total_price: product.unit_price * Decimal::from(*quantity),
                created_at: now,
                user_id: SYSTEM_USER.to_string(),
            })
            .collect();
        let total_amount: Decimal = items.iter().map(|item| item.total_price).sum();

        let order = Order {
            id: order_id.clone(),
            order_number: draft.order_number,
            customer_name: draft.customer_name,
            customer_email: draft.customer_email,
            customer_phone: draft.customer_phone,
            customer_address: draft.customer_address,
            status: draft.status,
            order_date: now,
            shipped_date: None,
            delivered_date: None,
            total_amount,
            notes: draft.notes,
            assigned_to: draft.assigned_to,
            created_at: now,
            updated_at: now,
            user_id: SYSTEM_USER.to_string(),
        };
        self.store.insert_order(order.clone(), items).await?;

        for (product, quantity) in resolved {
            let mut adjusted = product;
            adjusted.stock_quantity = (adjusted.stock_quantity - quantity).max(0);
            self.store.update_product(adjusted.clone()).await?;
            self.store
                .record_movement(InventoryMovement {
                    id: prefixed_id("mov"),
                    product_id: adjusted.id,
                    movement_type: MovementType::Out,
                    quantity,
                    reference_type: Some("order".to_string()),
                    reference_id: Some(order_id.clone()),
                    notes: None,
                    created_at: now,
                    user_id: SYSTEM_USER.to_string(),
                })
                .await?;
        }

        info!(
            id = %order.id,
            number = %order.order_number,
            total = %order.total_amount,
            "order placed"
        );
        let _ = self.event_tx.send(WarehouseEvent::OrderCreated(order.clone()));
        self.refresh_stats().await?;
        Ok(order)
    }

    // ---- lookups ----

    pub async fn products(&self) -> Result<Vec<Product>, WarehouseError> {
        Ok(self.store.list_products().await?)
    }

    pub async fn orders(&self) -> Result<Vec<Order>, WarehouseError> {
        Ok(self.store.list_orders().await?)
    }

    pub async fn product(&self, id: &str) -> Result<Product, WarehouseError> {
        self.store
            .get_product(id)
            .await?
            .ok_or_else(|| WarehouseError::ProductNotFound(id.to_string()))
    }

    pub async fn order(&self, id: &str) -> Result<Order, WarehouseError> {
        self.store
            .get_order(id)
            .await?
            .ok_or_else(|| WarehouseError::OrderNotFound(id.to_string()))
    }

    /// The order's line items paired with their products. Items whose
    /// product no longer resolves are omitted rather than failing the view.
    pub async fn order_lines(
        &self,
        order_id: &str,
    ) -> Result<Vec<(OrderItem, Product)>, WarehouseError> {
        self.order(order_id).await?;

        let mut lines = Vec::new();
        for item in self.store.items_for_order(order_id).await? {
            if let Some(product) = self.store.get_product(&item.product_id).await? {
                lines.push((item, product));
            }
        }
        Ok(lines)
    }

    /// Case-insensitive substring match over name, SKU, brand, and
    /// category.
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, WarehouseError> {
        let query = query.to_lowercase();
        let products = self.store.list_products().await?;
        Ok(products
            .into_iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.sku.to_lowercase().contains(&query)
                    || p.brand.to_lowercase().contains(&query)
                    || p.category.to_lowercase().contains(&query)
            })
            .collect())
    }

    /// Case-insensitive substring match over order number and customer
    /// name/email.
    pub async fn search_orders(&self, query: &str) -> Result<Vec<Order>, WarehouseError> {
        let query = query.to_lowercase();
        let orders = self.store.list_orders().await?;
        Ok(orders
            .into_iter()
            .filter(|o| {
                o.order_number.to_lowercase().contains(&query)
                    || o.customer_name.to_lowercase().contains(&query)
                    || o.customer_email.to_lowercase().contains(&query)
            })
            .collect())
    }

    pub async fn low_stock_products(&self) -> Result<Vec<Product>, WarehouseError> {
        let products = self.store.list_products().await?;
        Ok(products.into_iter().filter(Product::is_low_stock).collect())
    }

    pub async fn movements_for_product(
        &self,
        product_id: &str,
    ) -> Result<Vec<InventoryMovement>, WarehouseError> {
        Ok(self.store.movements_for_product(product_id).await?)
    }

    // ---- derived views ----

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, WarehouseError> {
        let products = self.store.list_products().await?;
        let orders = self.store.list_orders().await?;
        Ok(stats::dashboard_stats(&products, &orders))
    }

    pub async fn category_breakdown(&self) -> Result<HashMap<String, usize>, WarehouseError> {
        Ok(stats::category_breakdown(&self.store.list_products().await?))
    }

    pub async fn status_breakdown(&self) -> Result<HashMap<OrderStatus, usize>, WarehouseError> {
        Ok(stats::status_breakdown(&self.store.list_orders().await?))
    }

    pub async fn revenue_by_month(&self) -> Result<BTreeMap<String, Decimal>, WarehouseError> {
        Ok(stats::revenue_by_month(&self.store.list_orders().await?))
    }

    pub async fn top_value_products(&self) -> Result<Vec<Product>, WarehouseError> {
        Ok(stats::top_value_products(
            &self.store.list_products().await?,
            TOP_N,
        ))
    }

    pub async fn recent_orders(&self) -> Result<Vec<Order>, WarehouseError> {
        Ok(stats::recent_orders(&self.store.list_orders().await?, TOP_N))
    }

    pub async fn average_order_value(&self) -> Result<Decimal, WarehouseError> {
        Ok(stats::average_order_value(&self.store.list_orders().await?))
    }

    /// Recomputes dashboard statistics from the current collections and
    /// broadcasts them. Runs after every committed mutation.
    async fn refresh_stats(&self) -> Result<(), WarehouseError> {
        let stats = self.dashboard_stats().await?;
        let _ = self.event_tx.send(WarehouseEvent::StatsRecomputed(stats));
        Ok(())
    }
}

fn validate_product(draft: &ProductDraft) -> Result<(), ValidationError> {
    for (field, value) in [
        ("name", &draft.name),
        ("category", &draft.category),
        ("brand", &draft.brand),
        ("sku", &draft.sku),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }
    if draft.unit_price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice("unit_price"));
    }
    if draft.cost_price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice("cost_price"));
    }
    if draft.stock_quantity < 0 {
        return Err(ValidationError::NegativeStock);
    }
    Ok(())
}

fn validate_order(draft: &OrderDraft, entries: &[(String, i64)]) -> Result<(), ValidationError> {
    for (field, value) in [
        ("order_number", &draft.order_number),
        ("customer_name", &draft.customer_name),
        ("customer_email", &draft.customer_email),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }
    if entries.is_empty() {
        return Err(ValidationError::EmptyOrder);
    }
    for (product_id, quantity) in entries {
        if *quantity < 1 {
            return Err(ValidationError::NonPositiveQuantity(product_id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use anyhow::Result;
    use futures::StreamExt;
    use rust_decimal_macros::dec;
    use std::time::Duration;
    use tokio::time::sleep;

    fn draft(name: &str, sku: &str, price: Decimal, stock: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category: "Laptops".to_string(),
            brand: "Acme".to_string(),
            model: "X1".to_string(),
            sku: sku.to_string(),
            unit_price: price,
            cost_price: dec!(1),
            stock_quantity: stock,
            min_stock_level: 1,
            max_stock_level: 100,
            ..Default::default()
        }
    }

    fn order_draft() -> OrderDraft {
        OrderDraft {
            order_number: Order::generate_order_number(),
            customer_name: "Jane Doe".to_string(),
            customer_email: "jane@example.com".to_string(),
            ..Default::default()
        }
    }

    fn engine() -> WarehouseEngine<MemoryStore> {
        WarehouseEngine::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn add_product_assigns_identity_and_timestamps() -> Result<()> {
        let engine = engine();
        let product = engine
            .add_product(draft("Laptop", "SKU-1", dec!(999), 10))
            .await?;

        assert!(product.id.starts_with("prod_"));
        assert_eq!(product.created_at, product.updated_at);
        assert_eq!(product.user_id, "system");
        assert_eq!(engine.products().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn rejected_product_draft_mutates_nothing() -> Result<()> {
        let engine = engine();

        let missing_name = engine.add_product(draft("", "SKU-1", dec!(10), 5)).await;
        assert!(matches!(
            missing_name,
            Err(WarehouseError::Validation(ValidationError::MissingField(
                "name"
            )))
        ));

        let free_product = engine.add_product(draft("Laptop", "SKU-1", dec!(0), 5)).await;
        assert!(matches!(
            free_product,
            Err(WarehouseError::Validation(
                ValidationError::NonPositivePrice("unit_price")
            ))
        ));

        let negative_stock = engine
            .add_product(draft("Laptop", "SKU-1", dec!(10), -1))
            .await;
        assert!(matches!(
            negative_stock,
            Err(WarehouseError::Validation(ValidationError::NegativeStock))
        ));

        assert!(engine.products().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn edit_preserves_identity_and_advances_updated_at() -> Result<()> {
        let engine = engine();
        let created = engine
            .add_product(draft("Laptop", "SKU-1", dec!(999), 10))
            .await?;

        sleep(Duration::from_millis(5)).await;
        let edited = engine
            .update_product(&created.id, draft("Laptop Pro", "SKU-1", dec!(1299), 8))
            .await?;

        assert_eq!(edited.id, created.id);
        assert_eq!(edited.created_at, created.created_at);
        assert!(edited.updated_at > created.updated_at);
        assert_eq!(edited.name, "Laptop Pro");
        assert_eq!(edited.unit_price, dec!(1299));
        Ok(())
    }

    #[tokio::test]
    async fn edit_of_unknown_product_is_not_found() {
        let engine = engine();
        let result = engine
            .update_product("prod_ghost", draft("Laptop", "SKU-1", dec!(10), 5))
            .await;
        assert!(matches!(result, Err(WarehouseError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn order_total_comes_from_snapshot_prices() -> Result<()> {
        let engine = engine();
        let p1 = engine.add_product(draft("P1", "SKU-1", dec!(10), 20)).await?;
        let p2 = engine.add_product(draft("P2", "SKU-2", dec!(5), 20)).await?;

        let order = engine
            .place_order(order_draft(), &[(p1.id.clone(), 2), (p2.id.clone(), 1)])
            .await?;

        assert_eq!(order.total_amount, dec!(25));
        assert_eq!(engine.product(&p1.id).await?.stock_quantity, 18);
        assert_eq!(engine.product(&p2.id).await?.stock_quantity, 19);

        let lines = engine.order_lines(&order.id).await?;
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0.unit_price, dec!(10));
        assert_eq!(lines[0].0.total_price, dec!(20));
        Ok(())
    }

    #[tokio::test]
    async fn stock_decrement_clamps_at_zero_without_error() -> Result<()> {
        let engine = engine();
        let p = engine.add_product(draft("Scarce", "SKU-1", dec!(10), 1)).await?;

        engine.place_order(order_draft(), &[(p.id.clone(), 5)]).await?;

        assert_eq!(engine.product(&p.id).await?.stock_quantity, 0);
        Ok(())
    }

    #[tokio::test]
    async fn rejected_order_mutates_nothing() -> Result<()> {
        let engine = engine();
        let p = engine.add_product(draft("P1", "SKU-1", dec!(10), 5)).await?;

        let no_items = engine.place_order(order_draft(), &[]).await;
        assert!(matches!(
            no_items,
            Err(WarehouseError::Validation(ValidationError::EmptyOrder))
        ));

        let mut nameless = order_draft();
        nameless.customer_name = String::new();
        let missing_name = engine.place_order(nameless, &[(p.id.clone(), 1)]).await;
        assert!(matches!(
            missing_name,
            Err(WarehouseError::Validation(ValidationError::MissingField(
                "customer_name"
            )))
        ));

        let ghost = engine
            .place_order(
                order_draft(),
                &[(p.id.clone(), 1), ("prod_ghost".to_string(), 1)],
            )
            .await;
        assert!(matches!(ghost, Err(WarehouseError::ProductNotFound(_))));

        assert!(engine.orders().await?.is_empty());
        assert_eq!(engine.product(&p.id).await?.stock_quantity, 5);
        Ok(())
    }

    #[tokio::test]
    async fn order_placement_records_outbound_movements() -> Result<()> {
        let engine = engine();
        let p = engine.add_product(draft("P1", "SKU-1", dec!(10), 5)).await?;

        let order = engine.place_order(order_draft(), &[(p.id.clone(), 3)]).await?;

        let movements = engine.movements_for_product(&p.id).await?;
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].movement_type, MovementType::Out);
        assert_eq!(movements[0].quantity, 3);
        assert_eq!(movements[0].reference_id.as_deref(), Some(order.id.as_str()));
        Ok(())
    }

    #[tokio::test]
    async fn mutations_broadcast_entity_and_stats_events() -> Result<()> {
        let engine = engine();
        let mut events = engine.subscribe();

        let product = engine.add_product(draft("P1", "SKU-1", dec!(10), 5)).await?;

        match events.next().await {
            Some(Ok(WarehouseEvent::ProductCreated(p))) => assert_eq!(p.id, product.id),
            other => panic!("expected ProductCreated, got {:?}", other),
        }
        match events.next().await {
            Some(Ok(WarehouseEvent::StatsRecomputed(stats))) => {
                assert_eq!(stats.total_products, 1);
            }
            other => panic!("expected StatsRecomputed, got {:?}", other),
        }
        Ok(())
    }

    #[tokio::test]
    async fn order_lines_omit_unresolved_products() -> Result<()> {
        let store = MemoryStore::new();
        let now = Utc::now();
        let order = Order {
            id: "order_1".to_string(),
            order_number: "ORD-2024-000001".to_string(),
            customer_name: "Jane Doe".to_string(),
            customer_email: "jane@example.com".to_string(),
            customer_phone: None,
            customer_address: None,
            status: OrderStatus::Pending,
            order_date: now,
            shipped_date: None,
            delivered_date: None,
            total_amount: dec!(10),
            notes: None,
            assigned_to: None,
            created_at: now,
            updated_at: now,
            user_id: "system".to_string(),
        };
        let dangling = OrderItem {
            id: "item_1".to_string(),
            order_id: "order_1".to_string(),
            product_id: "prod_gone".to_string(),
            quantity: 1,
            unit_price: dec!(10),
            total_price: dec!(10),
            created_at: now,
            user_id: "system".to_string(),
        };
        store.insert_order(order, vec![dangling]).await?;

        let engine = WarehouseEngine::new(store);
        let lines = engine.order_lines("order_1").await?;
        assert!(lines.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn product_search_matches_name_sku_brand_and_category() -> Result<()> {
        let engine = engine();
        engine
            .add_product(draft("MacBook Pro", "MBP-14", dec!(1999), 10))
            .await?;
        engine
            .add_product(draft("Gaming Mouse", "LOG-1", dec!(149), 3))
            .await?;

        assert_eq!(engine.search_products("macbook").await?.len(), 1);
        assert_eq!(engine.search_products("LOG").await?.len(), 1);
        assert_eq!(engine.search_products("acme").await?.len(), 2);
        assert_eq!(engine.search_products("laptops").await?.len(), 2);
        assert!(engine.search_products("tablet").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn order_search_matches_number_customer_and_email() -> Result<()> {
        let engine = engine();
        let p = engine.add_product(draft("P1", "SKU-1", dec!(10), 20)).await?;

        let mut first = order_draft();
        first.order_number = "ORD-2024-000001".to_string();
        first.customer_name = "John Smith".to_string();
        first.customer_email = "john.smith@email.com".to_string();
        engine.place_order(first, &[(p.id.clone(), 1)]).await?;

        let mut second = order_draft();
        second.order_number = "ORD-2024-000002".to_string();
        second.customer_name = "Emily Davis".to_string();
        second.customer_email = "emily.davis@company.com".to_string();
        engine.place_order(second, &[(p.id.clone(), 1)]).await?;

        assert_eq!(engine.search_orders("000001").await?.len(), 1);
        assert_eq!(engine.search_orders("emily").await?.len(), 1);
        assert_eq!(engine.search_orders("COMPANY.COM").await?.len(), 1);
        assert_eq!(engine.search_orders("ord-2024").await?.len(), 2);
        assert!(engine.search_orders("nobody").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn dashboard_reflects_mutations() -> Result<()> {
        let engine = engine();
        let stats = engine.dashboard_stats().await?;
        assert_eq!(stats, DashboardStats::default());

        let p = engine.add_product(draft("P1", "SKU-1", dec!(10), 1)).await?;
        engine.place_order(order_draft(), &[(p.id.clone(), 1)]).await?;

        let stats = engine.dashboard_stats().await?;
        assert_eq!(stats.total_products, 1);
        assert_eq!(stats.total_orders, 1);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.total_revenue, dec!(10));
        // Stock fell to zero, at or below the minimum of 1.
        assert_eq!(stats.low_stock_items, 1);
        Ok(())
    }
}
