use crate::data::models::order::{Order, OrderItem, OrderWithItems};
use crate::services::order_service::{OrderStatus, PlacedOrder, StockWarning};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Deserialize)]
pub struct PlaceOrderRequest {
    pub order_type: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub pickup_datetime: Option<chrono::NaiveDateTime>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct UpdateOrderNotesRequest {
    pub notes: String,
}

#[derive(Serialize, Deserialize)]
pub struct StockWarningResponse {
    pub product_id: i32,
    pub requested: i32,
    pub available: i32,
}

impl From<StockWarning> for StockWarningResponse {
    fn from(warning: StockWarning) -> Self {
        StockWarningResponse {
            product_id: warning.product_id,
            requested: warning.requested,
            available: warning.available,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub order_id: i32,
    pub subtotal: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub total: BigDecimal,
    pub stock_warnings: Vec<StockWarningResponse>,
}

impl From<PlacedOrder> for PlaceOrderResponse {
    fn from(placed: PlacedOrder) -> Self {
        PlaceOrderResponse {
            order_id: placed.order_id,
            subtotal: placed.subtotal,
            delivery_fee: placed.delivery_fee,
            total: placed.total,
            stock_warnings: placed
                .stock_warnings
                .into_iter()
                .map(StockWarningResponse::from)
                .collect(),
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: i32,
    pub user_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub order_type: String,
    pub pickup_datetime: Option<String>,
    pub delivery_address: Option<String>,
    pub subtotal: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub total: BigDecimal,
    pub status: String,
    /// Legal next statuses, in the order the admin UI offers them.
    pub next_statuses: Vec<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let next_statuses = order
            .status
            .parse::<OrderStatus>()
            .map(|status| {
                status
                    .next_statuses()
                    .iter()
                    .map(|s| s.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default();

        OrderResponse {
            order_id: order.order_id,
            user_id: order.user_id,
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            order_type: order.order_type,
            pickup_datetime: order.pickup_datetime.map(|d| d.to_string()),
            delivery_address: order.delivery_address,
            subtotal: order.subtotal,
            delivery_fee: order.delivery_fee,
            total: order.total,
            status: order.status,
            next_statuses,
            notes: order.notes,
            created_at: order.created_at.map(|d| d.to_string()),
            updated_at: order.updated_at.map(|d| d.to_string()),
        }
    }
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct OrderLineResponse {
    pub product_id: i32,
    pub name: String,
    pub unit: Option<String>,
    pub image_uri: Option<String>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

impl From<OrderItem> for OrderLineResponse {
    fn from(item: OrderItem) -> Self {
        OrderLineResponse {
            product_id: item.product_id,
            name: item.name,
            unit: item.unit,
            image_uri: item.image_uri,
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: OrderResponse,
    pub items: Vec<OrderLineResponse>,
}

impl From<OrderWithItems> for OrderDetailResponse {
    fn from(detail: OrderWithItems) -> Self {
        OrderDetailResponse {
            order: OrderResponse::from(detail.order),
            items: detail
                .items
                .into_iter()
                .map(OrderLineResponse::from)
                .collect(),
        }
    }
}
