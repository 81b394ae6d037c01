use crate::data::models::schema::*;
use bigdecimal::BigDecimal;
use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, PartialEq, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(primary_key(product_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Product {
    pub product_id: i32,
    pub name: String,
    pub category: String,
    pub unit: Option<String>,
    pub image_uri: Option<String>,
    pub price: BigDecimal,
    pub original_price: Option<BigDecimal>,
    pub discounted_price: Option<BigDecimal>,
    pub stock: i32,
    pub visible: bool,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

/// A catalog product together with its promotional offers, as served
/// to the storefront.
#[derive(PartialEq, Debug, Clone)]
pub struct ProductWithOffers {
    pub product: Product,
    pub offers: Vec<crate::data::models::offer::Offer>,
}
