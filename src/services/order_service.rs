use std::sync::Arc;

use crate::data::models::cart_item::CartLine;
use crate::data::models::order::{NewOrder, Order, OrderLineSnapshot, OrderWithItems};
use crate::data::repos::traits::inventory_store::{InventoryStore, StockOutcome};
use crate::data::repos::traits::order_store::OrderStore;
use crate::security::session::Session;
use crate::services::errors::OrderServiceError;
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use tokio::sync::broadcast;

/// Order lifecycle states. `New` and `Processing` are transient;
/// `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    New,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Legal next states, in the order the admin UI presents them.
    pub fn next_statuses(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::New => &[OrderStatus::Processing, OrderStatus::Cancelled],
            OrderStatus::Processing => &[OrderStatus::Completed, OrderStatus::Cancelled],
            OrderStatus::Completed => &[],
            OrderStatus::Cancelled => &[],
        }
    }

    /// Self-loops are not transitions; terminal states allow nothing.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.next_statuses().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.next_statuses().is_empty()
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NEW" => Ok(OrderStatus::New),
            "PROCESSING" => Ok(OrderStatus::Processing),
            "COMPLETED" => Ok(OrderStatus::Completed),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Pickup,
    Delivery,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Pickup => "PICKUP",
            OrderType::Delivery => "DELIVERY",
        }
    }
}

impl std::str::FromStr for OrderType {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PICKUP" => Ok(OrderType::Pickup),
            "DELIVERY" => Ok(OrderType::Delivery),
            _ => Err(()),
        }
    }
}

/// Customer-entered checkout details.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub pickup_datetime: Option<NaiveDateTime>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
}

/// A stock decrement that could not be honored. Non-fatal: the order
/// already exists when these are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockWarning {
    pub product_id: i32,
    pub requested: i32,
    pub available: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order_id: i32,
    pub subtotal: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub total: BigDecimal,
    pub stock_warnings: Vec<StockWarning>,
}

/// Full current snapshot of an order, broadcast on every change so
/// observers replace their view wholesale instead of patching it.
pub type OrderFeedEvent = OrderWithItems;

pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    inventory: Arc<dyn InventoryStore>,
    delivery_fee: BigDecimal,
    events: broadcast::Sender<OrderFeedEvent>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        inventory: Arc<dyn InventoryStore>,
        delivery_fee: BigDecimal,
    ) -> Self {
        let (events, _) = broadcast::channel(64);
        OrderService {
            orders,
            inventory,
            delivery_fee,
            events,
        }
    }

    /// Live feed of order snapshots. Dropping the receiver releases
    /// the subscription.
    pub fn subscribe(&self) -> broadcast::Receiver<OrderFeedEvent> {
        self.events.subscribe()
    }

    /// Places an order from the cart snapshot.
    ///
    /// The order row is the authoritative commit: it is created first,
    /// with line prices taken from the cart's already-snapshotted
    /// prices, never re-fetched. Stock decrements run afterwards, one
    /// atomic transaction per product, and are best effort: an
    /// oversold or unreachable product yields a logged warning on the
    /// result, not a rollback of the order.
    pub async fn place_order(
        &self,
        session: &Session,
        order_type: OrderType,
        cart_lines: &[CartLine],
        details: &CustomerDetails,
    ) -> Result<PlacedOrder, OrderServiceError> {
        if !session.is_authenticated() {
            return Err(OrderServiceError::Unauthenticated);
        }
        validate(order_type, cart_lines, details)?;

        let mut subtotal = BigDecimal::from(0);
        let lines: Vec<OrderLineSnapshot> = cart_lines
            .iter()
            .map(|line| {
                let line_total = line.line_total();
                subtotal += &line_total;
                OrderLineSnapshot {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    unit: line.unit.clone(),
                    image_uri: line.image_uri.clone(),
                    quantity: line.quantity,
                    unit_price: line.price.clone(),
                    line_total,
                }
            })
            .collect();

        let delivery_fee = match order_type {
            OrderType::Delivery => self.delivery_fee.clone(),
            OrderType::Pickup => BigDecimal::from(0),
        };
        let total = &subtotal + &delivery_fee;

        let new_order = NewOrder {
            user_id: session.uid.clone(),
            customer_name: details.name.trim().to_string(),
            customer_phone: details.phone.trim().to_string(),
            order_type: order_type.as_str().to_string(),
            pickup_datetime: match order_type {
                OrderType::Pickup => details.pickup_datetime,
                OrderType::Delivery => None,
            },
            delivery_address: match order_type {
                OrderType::Delivery => details.delivery_address.clone(),
                OrderType::Pickup => None,
            },
            subtotal: subtotal.clone(),
            delivery_fee: delivery_fee.clone(),
            total: total.clone(),
            status: OrderStatus::New.as_str().to_string(),
            notes: details.notes.clone(),
        };

        let order_id = self
            .orders
            .create(new_order, lines)
            .await
            .map_err(|_| OrderServiceError::OrderCreationFailed)?;

        let stock_warnings = self.decrement_inventory(order_id, cart_lines).await;

        self.broadcast_snapshot(order_id).await;

        tracing::info!(order_id, user = %session.uid, "Order placed");

        Ok(PlacedOrder {
            order_id,
            subtotal,
            delivery_fee,
            total,
            stock_warnings,
        })
    }

    /// Best-effort inventory bookkeeping after the order exists. The
    /// order is never retracted here, whatever happens to the stock.
    async fn decrement_inventory(
        &self,
        order_id: i32,
        cart_lines: &[CartLine],
    ) -> Vec<StockWarning> {
        let mut warnings = Vec::new();

        for line in cart_lines {
            match self
                .inventory
                .decrement_stock(line.product_id, line.quantity)
                .await
            {
                Ok(StockOutcome::Decremented) => {}
                Ok(StockOutcome::Untracked) => {
                    tracing::debug!(
                        order_id,
                        product_id = line.product_id,
                        "Product has no inventory row, skipping stock decrement"
                    );
                }
                Ok(StockOutcome::Insufficient { available }) => {
                    tracing::warn!(
                        order_id,
                        product_id = line.product_id,
                        requested = line.quantity,
                        available,
                        "Insufficient stock for placed order, stock left unchanged"
                    );
                    warnings.push(StockWarning {
                        product_id: line.product_id,
                        requested: line.quantity,
                        available,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        order_id,
                        product_id = line.product_id,
                        error = %e,
                        "Stock decrement failed for placed order"
                    );
                }
            }
        }

        warnings
    }

    /// Validates and applies a status change. The check here is the
    /// advisory half; the authoritative enforcement belongs to the
    /// store's access-control layer.
    pub async fn apply_status_change(
        &self,
        order_id: i32,
        new_status: OrderStatus,
    ) -> Result<(), OrderServiceError> {
        let current = self
            .orders
            .get(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .ok_or(OrderServiceError::OrderNotFound)?;

        let current_status: OrderStatus = current
            .order
            .status
            .parse()
            .map_err(|_| OrderServiceError::InvalidStatusTransition)?;

        if !current_status.can_transition_to(new_status) {
            return Err(OrderServiceError::InvalidStatusTransition);
        }

        let found = self
            .orders
            .update_status(order_id, new_status.as_str())
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;
        if !found {
            return Err(OrderServiceError::OrderNotFound);
        }

        self.broadcast_snapshot(order_id).await;

        Ok(())
    }

    pub async fn update_notes(
        &self,
        order_id: i32,
        notes: &str,
    ) -> Result<(), OrderServiceError> {
        let found = self
            .orders
            .update_notes(order_id, notes)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?;
        if !found {
            return Err(OrderServiceError::OrderNotFound);
        }

        self.broadcast_snapshot(order_id).await;

        Ok(())
    }

    pub async fn get_order(&self, order_id: i32) -> Result<OrderWithItems, OrderServiceError> {
        self.orders
            .get(order_id)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)?
            .ok_or(OrderServiceError::OrderNotFound)
    }

    pub async fn get_user_orders(
        &self,
        session: &Session,
    ) -> Result<Vec<Order>, OrderServiceError> {
        if !session.is_authenticated() {
            return Err(OrderServiceError::Unauthenticated);
        }
        self.orders
            .list_for_user(&session.uid)
            .await
            .map_err(|_| OrderServiceError::DatabaseError)
    }

    pub async fn get_all_orders(&self) -> Result<Vec<Order>, OrderServiceError> {
        self.orders
            .list_all()
            .await
            .map_err(|_| OrderServiceError::DatabaseError)
    }

    pub async fn get_orders_by_status(
        &self,
        status: OrderStatus,
    ) -> Result<Vec<Order>, OrderServiceError> {
        self.orders
            .list_by_status(status.as_str())
            .await
            .map_err(|_| OrderServiceError::DatabaseError)
    }

    /// Re-reads the committed order and pushes the full snapshot to
    /// observers. Best effort.
    async fn broadcast_snapshot(&self, order_id: i32) {
        match self.orders.get(order_id).await {
            Ok(Some(snapshot)) => {
                let _ = self.events.send(snapshot);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(order_id, error = %e, "Could not read order back for broadcast");
            }
        }
    }
}

fn validate(
    order_type: OrderType,
    cart_lines: &[CartLine],
    details: &CustomerDetails,
) -> Result<(), OrderServiceError> {
    if cart_lines.is_empty() {
        return Err(OrderServiceError::Validation("cart is empty".to_string()));
    }
    if cart_lines.iter().any(|l| l.quantity < 1) {
        return Err(OrderServiceError::Validation(
            "line quantity must be at least 1".to_string(),
        ));
    }
    if details.name.trim().is_empty() {
        return Err(OrderServiceError::Validation(
            "customer name is required".to_string(),
        ));
    }
    if details.phone.trim().is_empty() {
        return Err(OrderServiceError::Validation(
            "customer phone is required".to_string(),
        ));
    }
    match order_type {
        OrderType::Pickup => {
            if details.pickup_datetime.is_none() {
                return Err(OrderServiceError::Validation(
                    "pickup time slot is required".to_string(),
                ));
            }
        }
        OrderType::Delivery => {
            if details
                .delivery_address
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .is_empty()
            {
                return Err(OrderServiceError::Validation(
                    "delivery address is required".to_string(),
                ));
            }
        }
    }
    Ok(())
}
