//! Fixed sample records the session starts from, matching the demo dataset
//! of the original system: a small electronics catalog and a handful of
//! orders in various states.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use crate::entities::orders::{Order, OrderItem, OrderStatus};
use crate::entities::products::{Product, ProductStatus};
use crate::storage::WarehouseStore;

fn ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("seed timestamp")
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: &str,
    brand: &str,
    model: &str,
    sku: &str,
    description: &str,
    specifications: serde_json::Value,
    unit_price: Decimal,
    cost_price: Decimal,
    stock_quantity: i64,
    min_stock_level: i64,
    max_stock_level: i64,
    location: &str,
) -> Product {
    let created = ts("2024-01-15T10:00:00Z");
    Product {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        sku: sku.to_string(),
        description: Some(description.to_string()),
        specifications: Some(specifications),
        unit_price,
        cost_price,
        stock_quantity,
        min_stock_level,
        max_stock_level,
        location: Some(location.to_string()),
        status: ProductStatus::Active,
        created_at: created,
        updated_at: created,
        user_id: "system".to_string(),
    }
}

pub fn sample_products() -> Vec<Product> {
    vec![
        product(
            "prod_1",
            "MacBook Pro 14\"",
            "Laptops",
            "Apple",
            "MacBook Pro",
            "MBP-14-M3-512",
            "Latest MacBook Pro with M3 chip",
            json!({
                "processor": "M3",
                "ram": "16GB",
                "storage": "512GB SSD",
                "display": "14-inch Liquid Retina XDR"
            }),
            dec!(1999.00),
            dec!(1600.00),
            25,
            5,
            50,
            "A1-B2",
        ),
        product(
            "prod_2",
            "Dell XPS 13",
            "Laptops",
            "Dell",
            "XPS 13",
            "DELL-XPS13-I7",
            "Ultra-portable business laptop",
            json!({
                "processor": "Intel i7-13700H",
                "ram": "16GB",
                "storage": "1TB SSD",
                "display": "13.4-inch FHD+"
            }),
            dec!(1299.00),
            dec!(1000.00),
            18,
            5,
            40,
            "A1-B3",
        ),
        product(
            "prod_3",
            "ThinkPad X1 Carbon",
            "Laptops",
            "Lenovo",
            "ThinkPad X1",
            "TP-X1C-G11",
            "Business ultrabook with excellent keyboard",
            json!({
                "processor": "Intel i7-1365U",
                "ram": "32GB",
                "storage": "1TB SSD",
                "display": "14-inch WUXGA"
            }),
            dec!(1599.00),
            dec!(1200.00),
            12,
            3,
            30,
            "A2-B1",
        ),
        product(
            "prod_4",
            "iPad Pro 12.9\"",
            "Tablets",
            "Apple",
            "iPad Pro",
            "IPAD-PRO-129-1TB",
            "Professional tablet with M2 chip",
            json!({
                "processor": "M2",
                "ram": "16GB",
                "storage": "1TB",
                "display": "12.9-inch Liquid Retina XDR"
            }),
            dec!(1399.00),
            dec!(1100.00),
            8,
            3,
            25,
            "B1-A1",
        ),
        product(
            "prod_5",
            "Surface Pro 9",
            "Tablets",
            "Microsoft",
            "Surface Pro",
            "SURF-PRO9-I7",
            "2-in-1 tablet with keyboard",
            json!({
                "processor": "Intel i7-1255U",
                "ram": "16GB",
                "storage": "512GB SSD",
                "display": "13-inch PixelSense"
            }),
            dec!(1199.00),
            dec!(950.00),
            15,
            5,
            30,
            "B1-A2",
        ),
        product(
            "prod_6",
            "Gaming Mouse Pro",
            "Accessories",
            "Logitech",
            "G Pro X",
            "LOG-GPRO-X",
            "Professional gaming mouse",
            json!({
                "sensor": "HERO 25K",
                "dpi": "25,600",
                "buttons": "8",
                "weight": "63g"
            }),
            dec!(149.00),
            dec!(100.00),
            2,
            10,
            50,
            "C1-A1",
        ),
    ]
}

pub fn sample_orders() -> Vec<(Order, Vec<OrderItem>)> {
    let order = |id: &str,
                 number: &str,
                 name: &str,
                 email: &str,
                 status: OrderStatus,
                 order_date: &str,
                 total: Decimal| Order {
        id: id.to_string(),
        order_number: number.to_string(),
        customer_name: name.to_string(),
        customer_email: email.to_string(),
        customer_phone: None,
        customer_address: None,
        status,
        order_date: ts(order_date),
        shipped_date: None,
        delivered_date: None,
        total_amount: total,
        notes: None,
        assigned_to: None,
        created_at: ts(order_date),
        updated_at: ts(order_date),
        user_id: "system".to_string(),
    };
    let item = |id: &str, order_id: &str, product_id: &str, quantity: i64, price: Decimal| {
        OrderItem {
            id: id.to_string(),
            order_id: order_id.to_string(),
            product_id: product_id.to_string(),
            quantity,
            unit_price: price,
            total_price: price * Decimal::from(quantity),
            created_at: ts("2024-01-16T09:30:00Z"),
            user_id: "system".to_string(),
        }
    };

    let mut order_1 = order(
        "order_1",
        "ORD-2024-001",
        "John Smith",
        "john.smith@email.com",
        OrderStatus::Processing,
        "2024-01-16T09:30:00Z",
        dec!(3598.00),
    );
    order_1.customer_phone = Some("+1-555-0123".to_string());
    order_1.customer_address = Some("123 Main St, New York, NY 10001".to_string());
    order_1.assigned_to = Some("Sarah Johnson".to_string());
    order_1.notes = Some("Customer requested expedited shipping".to_string());

    let mut order_2 = order(
        "order_2",
        "ORD-2024-002",
        "Emily Davis",
        "emily.davis@company.com",
        OrderStatus::Shipped,
        "2024-01-15T14:20:00Z",
        dec!(1299.00),
    );
    order_2.shipped_date = Some(ts("2024-01-16T10:00:00Z"));
    order_2.assigned_to = Some("Mike Wilson".to_string());

    let mut order_3 = order(
        "order_3",
        "ORD-2024-003",
        "Robert Brown",
        "robert.brown@email.com",
        OrderStatus::Pending,
        "2024-01-17T11:15:00Z",
        dec!(2798.00),
    );
    order_3.assigned_to = Some("Sarah Johnson".to_string());
    order_3.notes = Some("Bulk order for startup company".to_string());

    let mut order_4 = order(
        "order_4",
        "ORD-2024-004",
        "Lisa Wilson",
        "lisa.wilson@email.com",
        OrderStatus::Delivered,
        "2024-01-14T16:45:00Z",
        dec!(1199.00),
    );
    order_4.shipped_date = Some(ts("2024-01-15T09:00:00Z"));
    order_4.delivered_date = Some(ts("2024-01-16T14:30:00Z"));
    order_4.assigned_to = Some("Mike Wilson".to_string());

    let mut order_5 = order(
        "order_5",
        "ORD-2024-005",
        "David Chen",
        "david.chen@tech.com",
        OrderStatus::Cancelled,
        "2024-01-13T13:20:00Z",
        dec!(1999.00),
    );
    order_5.notes = Some("Customer cancelled due to budget constraints".to_string());

    vec![
        (
            order_1,
            vec![
                item("item_1", "order_1", "prod_1", 1, dec!(1999.00)),
                item("item_2", "order_1", "prod_3", 1, dec!(1599.00)),
            ],
        ),
        (
            order_2,
            vec![item("item_3", "order_2", "prod_2", 1, dec!(1299.00))],
        ),
        (
            order_3,
            vec![
                item("item_4", "order_3", "prod_1", 1, dec!(1999.00)),
                item("item_5", "order_3", "prod_5", 1, dec!(1199.00)),
            ],
        ),
        (
            order_4,
            vec![item("item_6", "order_4", "prod_5", 1, dec!(1199.00))],
        ),
        (order_5, vec![]),
    ]
}

/// Loads the sample dataset into a store. Seeding bypasses the engine on
/// purpose: the records carry their historical ids, timestamps, and totals.
pub async fn load<S: WarehouseStore>(store: &S) -> Result<()> {
    for product in sample_products() {
        store.insert_product(product).await?;
    }
    for (order, items) in sample_orders() {
        store.insert_order(order, items).await?;
    }
    Ok(())
}
