use crate::data::models::cart_item::CartLine;
use crate::services::cart_service::CartView;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i32,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct CartLineResponse {
    pub product_id: i32,
    pub name: String,
    pub unit: Option<String>,
    pub image_uri: Option<String>,
    pub price: BigDecimal,
    pub quantity: i32,
    pub line_total: BigDecimal,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        let line_total = line.line_total();
        CartLineResponse {
            product_id: line.product_id,
            name: line.name,
            unit: line.unit,
            image_uri: line.image_uri,
            price: line.price,
            quantity: line.quantity,
            line_total,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct CartResponse {
    pub items: Vec<CartLineResponse>,
    pub total: BigDecimal,
    pub item_count: i64,
    /// True when the local fallback served this cart because the
    /// remote store was unreachable.
    pub degraded: bool,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        CartResponse {
            items: view.lines.into_iter().map(CartLineResponse::from).collect(),
            total: view.total,
            item_count: view.item_count,
            degraded: view.degraded,
        }
    }
}
