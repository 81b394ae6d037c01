use crate::data::models::schema::*;
use diesel::prelude::*;

/// Promotional badge kinds a product can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferType {
    BestSeller,
    TodaysDeal,
    NewArrival,
    LimitedStock,
    FlashSale,
}

impl OfferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferType::BestSeller => "BEST_SELLER",
            OfferType::TodaysDeal => "TODAYS_DEAL",
            OfferType::NewArrival => "NEW_ARRIVAL",
            OfferType::LimitedStock => "LIMITED_STOCK",
            OfferType::FlashSale => "FLASH_SALE",
        }
    }
}

impl std::str::FromStr for OfferType {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BEST_SELLER" => Ok(OfferType::BestSeller),
            "TODAYS_DEAL" => Ok(OfferType::TodaysDeal),
            "NEW_ARRIVAL" => Ok(OfferType::NewArrival),
            "LIMITED_STOCK" => Ok(OfferType::LimitedStock),
            "FLASH_SALE" => Ok(OfferType::FlashSale),
            _ => Err(()),
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Associations, PartialEq, Debug, Clone)]
#[diesel(table_name = offers)]
#[diesel(primary_key(offer_id))]
#[diesel(belongs_to(crate::data::models::product::Product, foreign_key = product_id))]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct Offer {
    pub offer_id: i32,
    pub product_id: i32,
    pub offer_type: String,
    pub is_active: bool,
    pub start_time: Option<chrono::NaiveDateTime>,
    pub end_time: Option<chrono::NaiveDateTime>,
    pub priority: i32,
}
