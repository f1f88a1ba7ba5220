use anyhow::Result;
use futures::StreamExt;
use std::sync::Arc;
use tracing::info;

use warehouse_ops::entities::orders::{Order, OrderComposer, OrderDraft};
use warehouse_ops::seed;
use warehouse_ops::storage::MemoryStore;
use warehouse_ops::{WarehouseEngine, WarehouseEvent};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    // Seed the session with the fixed sample dataset.
    let store = MemoryStore::new();
    seed::load(&store).await?;

    let engine = Arc::new(WarehouseEngine::new(store));

    // Mirror what the dashboard does: re-render on every event.
    let mut events = engine.subscribe();
    tokio::spawn(async move {
        while let Some(Ok(event)) = events.next().await {
            match event {
                WarehouseEvent::ProductCreated(p) => {
                    info!("product created: {} ({})", p.name, p.id);
                }
                WarehouseEvent::ProductUpdated(p) => {
                    info!("product updated: {} ({})", p.name, p.id);
                }
                WarehouseEvent::OrderCreated(o) => {
                    info!("order created: {} ({})", o.order_number, o.id);
                }
                WarehouseEvent::StatsRecomputed(stats) => {
                    info!(
                        "dashboard: {} products, {} orders, {} low stock, revenue {}",
                        stats.total_products,
                        stats.total_orders,
                        stats.low_stock_items,
                        stats.total_revenue
                    );
                }
            }
        }
    });

    // Compose and place an order for two MacBooks and a mouse.
    let macbook = engine.product("prod_1").await?;
    let mouse = engine.product("prod_6").await?;

    let mut cart = OrderComposer::new();
    cart.add_product(&macbook);
    cart.add_product(&macbook);
    cart.add_product(&mouse);
    info!("cart total before submission: {}", cart.total());

    let order = engine
        .place_order(
            OrderDraft {
                order_number: Order::generate_order_number(),
                customer_name: "Ada Lovelace".to_string(),
                customer_email: "ada@example.com".to_string(),
                ..Default::default()
            },
            &cart.entries(),
        )
        .await?;
    info!(
        "placed order {} for {} ({} lines)",
        order.order_number,
        order.total_amount,
        cart.lines().len()
    );

    // Analytics snapshot.
    info!("average order value: {}", engine.average_order_value().await?);
    for (month, revenue) in engine.revenue_by_month().await? {
        info!("revenue {}: {}", month, revenue);
    }
    for (category, count) in engine.category_breakdown().await? {
        info!("category {}: {} products", category, count);
    }
    for product in engine.top_value_products().await? {
        info!(
            "top value: {} ({} on hand, {} each)",
            product.name, product.stock_quantity, product.unit_price
        );
    }
    for order in engine.recent_orders().await? {
        info!("recent: {} on {}", order.order_number, order.order_date);
    }
    for product in engine.low_stock_products().await? {
        info!(
            "low stock: {} ({} on hand, minimum {})",
            product.name, product.stock_quantity, product.min_stock_level
        );
    }

    Ok(())
}
