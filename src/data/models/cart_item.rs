use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One product's entry in a cart. The price is snapshotted at add-time
/// and deliberately insulated from later catalog price changes.
///
/// This is the storage-neutral shape shared by the remote `cart_items`
/// table and the local JSON fallback store.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct CartLine {
    pub product_id: i32,
    pub name: String,
    pub unit: Option<String>,
    pub image_uri: Option<String>,
    pub price: BigDecimal,
    pub quantity: i32,
}

impl CartLine {
    pub fn line_total(&self) -> BigDecimal {
        &self.price * BigDecimal::from(self.quantity)
    }
}

#[derive(Queryable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = cart_items)]
#[diesel(primary_key(owner_id, product_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct CartItemRow {
    pub owner_id: String,
    pub product_id: i32,
    pub name: String,
    pub unit: Option<String>,
    pub image_uri: Option<String>,
    pub price: BigDecimal,
    pub quantity: i32,
    pub added_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

impl From<CartItemRow> for CartLine {
    fn from(row: CartItemRow) -> Self {
        CartLine {
            product_id: row.product_id,
            name: row.name,
            unit: row.unit,
            image_uri: row.image_uri,
            price: row.price,
            quantity: row.quantity,
        }
    }
}

#[derive(Insertable, PartialEq, Debug)]
#[diesel(table_name = cart_items)]
pub struct NewCartItem<'a> {
    pub owner_id: &'a str,
    pub product_id: i32,
    pub name: &'a str,
    pub unit: Option<&'a str>,
    pub image_uri: Option<&'a str>,
    pub price: &'a BigDecimal,
    pub quantity: i32,
}
