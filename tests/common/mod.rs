#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use muchshop_server_lib::data::models::cart_item::CartLine;
use muchshop_server_lib::data::models::offer::Offer;
use muchshop_server_lib::data::models::order::{
    NewOrder, Order, OrderItem, OrderLineSnapshot, OrderWithItems,
};
use muchshop_server_lib::data::models::product::Product;
use muchshop_server_lib::data::repos::traits::cart_repository::CartRepository;
use muchshop_server_lib::data::repos::traits::favorite_repository::FavoriteRepository;
use muchshop_server_lib::data::repos::traits::inventory_store::{InventoryStore, StockOutcome};
use muchshop_server_lib::data::repos::traits::order_store::OrderStore;
use muchshop_server_lib::data::repos::traits::StoreError;
use muchshop_server_lib::security::session::Session;

pub fn money(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).expect("valid decimal literal")
}

pub fn user_session(uid: &str) -> Session {
    Session {
        uid: uid.to_string(),
        email: Some(format!("{uid}@example.com")),
        is_anonymous: false,
        admin: false,
    }
}

pub fn product(id: i32, price: &str, stock: i32) -> Product {
    Product {
        product_id: id,
        name: format!("Product {id}"),
        category: "Groceries".to_string(),
        unit: Some("kg".to_string()),
        image_uri: None,
        price: money(price),
        original_price: None,
        discounted_price: None,
        stock,
        visible: true,
        created_at: None,
        updated_at: None,
    }
}

pub fn offer(offer_type: &str, priority: i32) -> Offer {
    Offer {
        offer_id: 0,
        product_id: 1,
        offer_type: offer_type.to_string(),
        is_active: true,
        start_time: None,
        end_time: None,
        priority,
    }
}

pub fn cart_line(product_id: i32, price: &str, quantity: i32) -> CartLine {
    CartLine {
        product_id,
        name: format!("Product {product_id}"),
        unit: Some("kg".to_string()),
        image_uri: None,
        price: money(price),
        quantity,
    }
}

/// In-memory cart backend.
#[derive(Default)]
pub struct MemoryCartRepo {
    carts: Mutex<HashMap<String, Vec<CartLine>>>,
}

impl MemoryCartRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for MemoryCartRepo {
    async fn lines(&self, owner: &str) -> Result<Vec<CartLine>, StoreError> {
        Ok(self
            .carts
            .lock()
            .unwrap()
            .get(owner)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_line(
        &self,
        owner: &str,
        product_id: i32,
    ) -> Result<Option<CartLine>, StoreError> {
        Ok(self
            .carts
            .lock()
            .unwrap()
            .get(owner)
            .and_then(|lines| lines.iter().find(|l| l.product_id == product_id).cloned()))
    }

    async fn upsert_line(&self, owner: &str, line: CartLine) -> Result<(), StoreError> {
        let mut carts = self.carts.lock().unwrap();
        let lines = carts.entry(owner.to_string()).or_default();
        match lines.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => *existing = line,
            None => lines.push(line),
        }
        Ok(())
    }

    async fn set_quantity(
        &self,
        owner: &str,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), StoreError> {
        let mut carts = self.carts.lock().unwrap();
        if let Some(lines) = carts.get_mut(owner) {
            if let Some(line) = lines.iter_mut().find(|l| l.product_id == product_id) {
                line.quantity = quantity;
            }
        }
        Ok(())
    }

    async fn remove_line(&self, owner: &str, product_id: i32) -> Result<(), StoreError> {
        let mut carts = self.carts.lock().unwrap();
        if let Some(lines) = carts.get_mut(owner) {
            lines.retain(|l| l.product_id != product_id);
        }
        Ok(())
    }

    async fn clear(&self, owner: &str) -> Result<(), StoreError> {
        self.carts.lock().unwrap().remove(owner);
        Ok(())
    }

    async fn replace_all(&self, owner: &str, lines: &[CartLine]) -> Result<(), StoreError> {
        self.carts
            .lock()
            .unwrap()
            .insert(owner.to_string(), lines.to_vec());
        Ok(())
    }
}

/// Cart backend whose writes land durably but whose reads start
/// failing after the first write, as when the connection drops
/// mid-call.
pub struct ReadFailingCartRepo {
    pub inner: MemoryCartRepo,
    fail_reads: AtomicBool,
}

impl ReadFailingCartRepo {
    pub fn new() -> Self {
        ReadFailingCartRepo {
            inner: MemoryCartRepo::new(),
            fail_reads: AtomicBool::new(false),
        }
    }

    fn read_error(&self) -> Option<StoreError> {
        self.fail_reads
            .load(Ordering::SeqCst)
            .then(|| StoreError::Unavailable("connection reset".to_string()))
    }
}

#[async_trait]
impl CartRepository for ReadFailingCartRepo {
    async fn lines(&self, owner: &str) -> Result<Vec<CartLine>, StoreError> {
        match self.read_error() {
            Some(e) => Err(e),
            None => self.inner.lines(owner).await,
        }
    }

    async fn get_line(
        &self,
        owner: &str,
        product_id: i32,
    ) -> Result<Option<CartLine>, StoreError> {
        match self.read_error() {
            Some(e) => Err(e),
            None => self.inner.get_line(owner, product_id).await,
        }
    }

    async fn upsert_line(&self, owner: &str, line: CartLine) -> Result<(), StoreError> {
        self.inner.upsert_line(owner, line).await?;
        self.fail_reads.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn set_quantity(
        &self,
        owner: &str,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), StoreError> {
        self.inner.set_quantity(owner, product_id, quantity).await?;
        self.fail_reads.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn remove_line(&self, owner: &str, product_id: i32) -> Result<(), StoreError> {
        self.inner.remove_line(owner, product_id).await?;
        self.fail_reads.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self, owner: &str) -> Result<(), StoreError> {
        self.inner.clear(owner).await?;
        self.fail_reads.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn replace_all(&self, owner: &str, lines: &[CartLine]) -> Result<(), StoreError> {
        self.inner.replace_all(owner, lines).await?;
        self.fail_reads.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Cart backend that refuses every call, standing in for an
/// unreachable remote store.
pub struct UnreachableCartRepo;

#[async_trait]
impl CartRepository for UnreachableCartRepo {
    async fn lines(&self, _owner: &str) -> Result<Vec<CartLine>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get_line(
        &self,
        _owner: &str,
        _product_id: i32,
    ) -> Result<Option<CartLine>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn upsert_line(&self, _owner: &str, _line: CartLine) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn set_quantity(
        &self,
        _owner: &str,
        _product_id: i32,
        _quantity: i32,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn remove_line(&self, _owner: &str, _product_id: i32) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn clear(&self, _owner: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn replace_all(&self, _owner: &str, _lines: &[CartLine]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// In-memory order store counting writes, so tests can assert that
/// rejected placements wrote nothing.
#[derive(Default)]
pub struct MemoryOrderStore {
    orders: Mutex<Vec<OrderWithItems>>,
    next_id: AtomicI32,
    pub writes: AtomicUsize,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        MemoryOrderStore {
            orders: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Seed an existing order in a given status.
    pub fn seed(&self, user_id: &str, status: &str) -> i32 {
        let order_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.orders.lock().unwrap().push(OrderWithItems {
            order: Order {
                order_id,
                user_id: user_id.to_string(),
                customer_name: "Seed".to_string(),
                customer_phone: "000".to_string(),
                order_type: "PICKUP".to_string(),
                pickup_datetime: Some(now()),
                delivery_address: None,
                subtotal: money("10"),
                delivery_fee: money("0"),
                total: money("10"),
                status: status.to_string(),
                notes: None,
                created_at: Some(now()),
                updated_at: Some(now()),
            },
            items: Vec::new(),
        });
        order_id
    }
}

fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(
        &self,
        order: NewOrder,
        lines: Vec<OrderLineSnapshot>,
    ) -> Result<i32, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let order_id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let items = lines
            .into_iter()
            .map(|line| OrderItem {
                order_id,
                product_id: line.product_id,
                name: line.name,
                unit: line.unit,
                image_uri: line.image_uri,
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total,
            })
            .collect();

        self.orders.lock().unwrap().push(OrderWithItems {
            order: Order {
                order_id,
                user_id: order.user_id,
                customer_name: order.customer_name,
                customer_phone: order.customer_phone,
                order_type: order.order_type,
                pickup_datetime: order.pickup_datetime,
                delivery_address: order.delivery_address,
                subtotal: order.subtotal,
                delivery_fee: order.delivery_fee,
                total: order.total,
                status: order.status,
                notes: order.notes,
                created_at: Some(now()),
                updated_at: Some(now()),
            },
            items,
        });

        Ok(order_id)
    }

    async fn get(&self, order_id: i32) -> Result<Option<OrderWithItems>, StoreError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.order.order_id == order_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.order.user_id == user_id)
            .map(|o| o.order.clone())
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .map(|o| o.order.clone())
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.order.status == status)
            .map(|o| o.order.clone())
            .collect())
    }

    async fn update_status(&self, order_id: i32, status: &str) -> Result<bool, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut orders = self.orders.lock().unwrap();
        match orders.iter_mut().find(|o| o.order.order_id == order_id) {
            Some(entry) => {
                entry.order.status = status.to_string();
                entry.order.updated_at = Some(now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_notes(&self, order_id: i32, notes: &str) -> Result<bool, StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut orders = self.orders.lock().unwrap();
        match orders.iter_mut().find(|o| o.order.order_id == order_id) {
            Some(entry) => {
                entry.order.notes = Some(notes.to_string());
                entry.order.updated_at = Some(now());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory inventory keyed by product id. Products absent from the
/// map are untracked.
#[derive(Default)]
pub struct MemoryInventory {
    stock: Mutex<HashMap<i32, i32>>,
    pub writes: AtomicUsize,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock(pairs: &[(i32, i32)]) -> Self {
        let inventory = Self::default();
        {
            let mut stock = inventory.stock.lock().unwrap();
            for (id, quantity) in pairs {
                stock.insert(*id, *quantity);
            }
        }
        inventory
    }

    pub fn stock_of(&self, product_id: i32) -> Option<i32> {
        self.stock.lock().unwrap().get(&product_id).copied()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventoryStore for MemoryInventory {
    async fn decrement_stock(
        &self,
        product_id: i32,
        quantity: i32,
    ) -> Result<StockOutcome, StoreError> {
        let mut stock = self.stock.lock().unwrap();
        match stock.get_mut(&product_id) {
            None => Ok(StockOutcome::Untracked),
            Some(available) if *available < quantity => Ok(StockOutcome::Insufficient {
                available: *available,
            }),
            Some(available) => {
                *available -= quantity;
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(StockOutcome::Decremented)
            }
        }
    }
}

/// In-memory wishlist backend.
#[derive(Default)]
pub struct MemoryFavoriteRepo {
    favorites: Mutex<HashMap<String, Vec<i32>>>,
}

impl MemoryFavoriteRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteRepository for MemoryFavoriteRepo {
    async fn list(&self, owner: &str) -> Result<Vec<i32>, StoreError> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .get(owner)
            .cloned()
            .unwrap_or_default())
    }

    async fn contains(&self, owner: &str, product_id: i32) -> Result<bool, StoreError> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .get(owner)
            .is_some_and(|ids| ids.contains(&product_id)))
    }

    async fn add(&self, owner: &str, product_id: i32) -> Result<(), StoreError> {
        let mut favorites = self.favorites.lock().unwrap();
        let ids = favorites.entry(owner.to_string()).or_default();
        if !ids.contains(&product_id) {
            ids.push(product_id);
        }
        Ok(())
    }

    async fn remove(&self, owner: &str, product_id: i32) -> Result<(), StoreError> {
        let mut favorites = self.favorites.lock().unwrap();
        if let Some(ids) = favorites.get_mut(owner) {
            ids.retain(|id| *id != product_id);
        }
        Ok(())
    }
}

/// Wishlist backend that refuses every call.
pub struct UnreachableFavoriteRepo;

#[async_trait]
impl FavoriteRepository for UnreachableFavoriteRepo {
    async fn list(&self, _owner: &str) -> Result<Vec<i32>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn contains(&self, _owner: &str, _product_id: i32) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn add(&self, _owner: &str, _product_id: i32) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn remove(&self, _owner: &str, _product_id: i32) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
