use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Order {
    pub order_id: i32,
    pub user_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub order_type: String,
    pub pickup_datetime: Option<chrono::NaiveDateTime>,
    pub delivery_address: Option<String>,
    pub subtotal: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub total: BigDecimal,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

/// Everything except `status`, `notes` and `updated_at` is immutable
/// once the row exists; totals are never recomputed from live catalog
/// data after placement.
#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub user_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub order_type: String,
    pub pickup_datetime: Option<chrono::NaiveDateTime>,
    pub delivery_address: Option<String>,
    pub subtotal: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub total: BigDecimal,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = order_items)]
#[diesel(primary_key(order_id, product_id))]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct OrderItem {
    pub order_id: i32,
    pub product_id: i32,
    pub name: String,
    pub unit: Option<String>,
    pub image_uri: Option<String>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

#[derive(Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub product_id: i32,
    pub name: String,
    pub unit: Option<String>,
    pub image_uri: Option<String>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

/// A line captured at placement time, before the generated order id is
/// known. The repo attaches the id when inserting `order_items` rows.
#[derive(PartialEq, Debug, Clone)]
pub struct OrderLineSnapshot {
    pub product_id: i32,
    pub name: String,
    pub unit: Option<String>,
    pub image_uri: Option<String>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

/// An order with its snapshotted lines attached.
#[derive(PartialEq, Debug, Clone)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}
