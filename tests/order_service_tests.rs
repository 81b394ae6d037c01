mod common;

use std::sync::Arc;

use common::{MemoryInventory, MemoryOrderStore, cart_line, money, user_session};
use muchshop_server_lib::data::repos::traits::order_store::OrderStore;
use muchshop_server_lib::security::session::Session;
use muchshop_server_lib::services::errors::OrderServiceError;
use muchshop_server_lib::services::order_service::{
    CustomerDetails, OrderService, OrderType, StockWarning,
};

fn pickup_details() -> CustomerDetails {
    CustomerDetails {
        name: "Alice".to_string(),
        phone: "555-0100".to_string(),
        pickup_datetime: Some(chrono::Utc::now().naive_utc()),
        delivery_address: None,
        notes: None,
    }
}

fn delivery_details() -> CustomerDetails {
    CustomerDetails {
        name: "Alice".to_string(),
        phone: "555-0100".to_string(),
        pickup_datetime: None,
        delivery_address: Some("12 Main Street".to_string()),
        notes: Some("Ring twice".to_string()),
    }
}

fn service(
    orders: Arc<MemoryOrderStore>,
    inventory: Arc<MemoryInventory>,
) -> OrderService {
    OrderService::new(orders, inventory, money("30"))
}

#[tokio::test]
async fn test_pickup_order_totals() {
    let orders = Arc::new(MemoryOrderStore::new());
    let inventory = Arc::new(MemoryInventory::with_stock(&[(1, 10), (2, 10)]));
    let svc = service(orders.clone(), inventory);

    let cart = vec![cart_line(1, "50", 2), cart_line(2, "30", 1)];
    let placed = svc
        .place_order(&user_session("alice"), OrderType::Pickup, &cart, &pickup_details())
        .await
        .unwrap();

    assert_eq!(placed.subtotal, money("130"));
    assert_eq!(placed.delivery_fee, money("0"));
    assert_eq!(placed.total, money("130"));
    assert!(placed.stock_warnings.is_empty());

    let stored = orders.get(placed.order_id).await.unwrap().unwrap();
    assert_eq!(stored.order.status, "NEW");
    assert_eq!(stored.order.order_type, "PICKUP");
    assert!(stored.order.pickup_datetime.is_some());
    assert!(stored.order.delivery_address.is_none());
    assert_eq!(stored.items.len(), 2);
}

#[tokio::test]
async fn test_delivery_order_adds_fee() {
    let orders = Arc::new(MemoryOrderStore::new());
    let inventory = Arc::new(MemoryInventory::with_stock(&[(1, 10), (2, 10)]));
    let svc = service(orders.clone(), inventory);

    let cart = vec![cart_line(1, "50", 2), cart_line(2, "30", 1)];
    let placed = svc
        .place_order(
            &user_session("alice"),
            OrderType::Delivery,
            &cart,
            &delivery_details(),
        )
        .await
        .unwrap();

    assert_eq!(placed.subtotal, money("130"));
    assert_eq!(placed.delivery_fee, money("30"));
    assert_eq!(placed.total, money("160"));

    let stored = orders.get(placed.order_id).await.unwrap().unwrap();
    assert!(stored.order.pickup_datetime.is_none());
    assert_eq!(
        stored.order.delivery_address.as_deref(),
        Some("12 Main Street")
    );
}

#[tokio::test]
async fn test_anonymous_session_rejected_with_zero_writes() {
    let orders = Arc::new(MemoryOrderStore::new());
    let inventory = Arc::new(MemoryInventory::with_stock(&[(1, 10)]));
    let svc = service(orders.clone(), inventory.clone());

    let cart = vec![cart_line(1, "50", 1)];
    let result = svc
        .place_order(
            &Session::guest("device-1"),
            OrderType::Pickup,
            &cart,
            &pickup_details(),
        )
        .await;

    assert_eq!(result.unwrap_err(), OrderServiceError::Unauthenticated);
    assert_eq!(orders.write_count(), 0);
    assert_eq!(inventory.write_count(), 0);
}

#[tokio::test]
async fn test_oversell_creates_order_but_leaves_stock_unchanged() {
    let orders = Arc::new(MemoryOrderStore::new());
    let inventory = Arc::new(MemoryInventory::with_stock(&[(1, 1)]));
    let svc = service(orders.clone(), inventory.clone());

    let cart = vec![cart_line(1, "50", 2)];
    let placed = svc
        .place_order(&user_session("alice"), OrderType::Pickup, &cart, &pickup_details())
        .await
        .unwrap();

    // The order exists even though the stock could not cover it.
    assert!(orders.get(placed.order_id).await.unwrap().is_some());
    assert_eq!(
        placed.stock_warnings,
        vec![StockWarning {
            product_id: 1,
            requested: 2,
            available: 1,
        }]
    );
    assert_eq!(inventory.stock_of(1), Some(1));
}

#[tokio::test]
async fn test_stock_decremented_per_line() {
    let orders = Arc::new(MemoryOrderStore::new());
    let inventory = Arc::new(MemoryInventory::with_stock(&[(1, 5), (2, 5)]));
    let svc = service(orders, inventory.clone());

    let cart = vec![cart_line(1, "50", 2), cart_line(2, "30", 3)];
    svc.place_order(&user_session("alice"), OrderType::Pickup, &cart, &pickup_details())
        .await
        .unwrap();

    assert_eq!(inventory.stock_of(1), Some(3));
    assert_eq!(inventory.stock_of(2), Some(2));
}

#[tokio::test]
async fn test_untracked_product_skipped_without_warning() {
    let orders = Arc::new(MemoryOrderStore::new());
    // Product 7 has no inventory row at all.
    let inventory = Arc::new(MemoryInventory::new());
    let svc = service(orders, inventory);

    let cart = vec![cart_line(7, "10", 2)];
    let placed = svc
        .place_order(&user_session("alice"), OrderType::Pickup, &cart, &pickup_details())
        .await
        .unwrap();

    assert!(placed.stock_warnings.is_empty());
}

#[tokio::test]
async fn test_line_prices_are_snapshots_not_live() {
    let orders = Arc::new(MemoryOrderStore::new());
    let inventory = Arc::new(MemoryInventory::with_stock(&[(1, 10)]));
    let svc = service(orders.clone(), inventory);

    // The cart carries an older price than whatever the catalog says now.
    let cart = vec![cart_line(1, "42", 1)];
    let placed = svc
        .place_order(&user_session("alice"), OrderType::Pickup, &cart, &pickup_details())
        .await
        .unwrap();

    let stored = orders.get(placed.order_id).await.unwrap().unwrap();
    assert_eq!(stored.items[0].unit_price, money("42"));
    assert_eq!(stored.items[0].line_total, money("42"));
    assert_eq!(stored.order.subtotal, money("42"));
}

#[tokio::test]
async fn test_empty_cart_rejected() {
    let orders = Arc::new(MemoryOrderStore::new());
    let svc = service(orders.clone(), Arc::new(MemoryInventory::new()));

    let result = svc
        .place_order(&user_session("alice"), OrderType::Pickup, &[], &pickup_details())
        .await;

    assert!(matches!(
        result.unwrap_err(),
        OrderServiceError::Validation(_)
    ));
    assert_eq!(orders.write_count(), 0);
}

#[tokio::test]
async fn test_missing_customer_details_rejected() {
    let svc = service(
        Arc::new(MemoryOrderStore::new()),
        Arc::new(MemoryInventory::new()),
    );
    let cart = vec![cart_line(1, "50", 1)];

    let mut no_name = pickup_details();
    no_name.name = "  ".to_string();
    assert!(matches!(
        svc.place_order(&user_session("alice"), OrderType::Pickup, &cart, &no_name)
            .await
            .unwrap_err(),
        OrderServiceError::Validation(_)
    ));

    let mut no_phone = pickup_details();
    no_phone.phone = String::new();
    assert!(matches!(
        svc.place_order(&user_session("alice"), OrderType::Pickup, &cart, &no_phone)
            .await
            .unwrap_err(),
        OrderServiceError::Validation(_)
    ));

    let mut no_slot = pickup_details();
    no_slot.pickup_datetime = None;
    assert!(matches!(
        svc.place_order(&user_session("alice"), OrderType::Pickup, &cart, &no_slot)
            .await
            .unwrap_err(),
        OrderServiceError::Validation(_)
    ));

    let mut no_address = delivery_details();
    no_address.delivery_address = None;
    assert!(matches!(
        svc.place_order(&user_session("alice"), OrderType::Delivery, &cart, &no_address)
            .await
            .unwrap_err(),
        OrderServiceError::Validation(_)
    ));
}

#[tokio::test]
async fn test_placement_broadcasts_order_snapshot() {
    let orders = Arc::new(MemoryOrderStore::new());
    let inventory = Arc::new(MemoryInventory::with_stock(&[(1, 10)]));
    let svc = service(orders, inventory);
    let mut feed = svc.subscribe();

    let cart = vec![cart_line(1, "50", 1)];
    let placed = svc
        .place_order(&user_session("alice"), OrderType::Pickup, &cart, &pickup_details())
        .await
        .unwrap();

    let snapshot = feed.try_recv().unwrap();
    assert_eq!(snapshot.order.order_id, placed.order_id);
    assert_eq!(snapshot.order.status, "NEW");
    assert_eq!(snapshot.items.len(), 1);
}

#[tokio::test]
async fn test_user_order_listing() {
    let orders = Arc::new(MemoryOrderStore::new());
    let svc = service(orders.clone(), Arc::new(MemoryInventory::new()));

    orders.seed("alice", "NEW");
    orders.seed("bob", "NEW");
    orders.seed("alice", "COMPLETED");

    let mine = svc.get_user_orders(&user_session("alice")).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|o| o.user_id == "alice"));

    let guests = svc.get_user_orders(&Session::guest("device-1")).await;
    assert_eq!(guests.unwrap_err(), OrderServiceError::Unauthenticated);

    let all = svc.get_all_orders().await.unwrap();
    assert_eq!(all.len(), 3);
}
