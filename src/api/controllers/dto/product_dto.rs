use crate::data::models::offer::OfferType;
use crate::data::models::product::ProductWithOffers;
use crate::services::pricing;
use crate::services::product_service::MAX_OFFER_BADGES;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[derive(Serialize, Deserialize)]
pub struct OfferResponse {
    pub offer_type: String,
    pub priority: i32,
}

#[skip_serializing_none]
#[derive(Serialize, Deserialize)]
pub struct ProductResponse {
    pub product_id: i32,
    pub name: String,
    pub category: String,
    pub unit: Option<String>,
    pub image_uri: Option<String>,
    pub original_price: BigDecimal,
    pub current_price: BigDecimal,
    pub discount_percent: u8,
    pub has_discount: bool,
    pub stock: i32,
    pub offers: Vec<OfferResponse>,
}

impl From<ProductWithOffers> for ProductResponse {
    fn from(entry: ProductWithOffers) -> Self {
        let pricing = pricing::pricing_for(&entry.product);
        let now = chrono::Utc::now().naive_utc();

        // Unknown badge kinds are dropped rather than leaked raw.
        let offers = pricing::active_offers(&entry.offers, now, MAX_OFFER_BADGES)
            .into_iter()
            .filter_map(|offer| {
                offer
                    .offer_type
                    .parse::<OfferType>()
                    .ok()
                    .map(|kind| OfferResponse {
                        offer_type: kind.as_str().to_string(),
                        priority: offer.priority,
                    })
            })
            .collect();

        ProductResponse {
            product_id: entry.product.product_id,
            name: entry.product.name,
            category: entry.product.category,
            unit: entry.product.unit,
            image_uri: entry.product.image_uri,
            original_price: pricing.original_price,
            current_price: pricing.current_price,
            discount_percent: pricing.discount_percent,
            has_discount: pricing.has_discount,
            stock: entry.product.stock,
            offers,
        }
    }
}
