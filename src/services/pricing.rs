use crate::data::models::offer::Offer;
use crate::data::models::product::Product;
use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::NaiveDateTime;

/// Effective price of a product plus the discount badge data derived
/// from it. Pure computation; nothing here touches storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Pricing {
    pub original_price: BigDecimal,
    pub current_price: BigDecimal,
    pub discount_percent: u8,
    pub has_discount: bool,
}

/// Computes the price a product sells at right now.
///
/// The listed original price wins over the base price when present. A
/// discount only counts if the discounted price is strictly below the
/// original; equal-or-higher "discounts" are ignored.
pub fn pricing_for(product: &Product) -> Pricing {
    let original = product
        .original_price
        .clone()
        .unwrap_or_else(|| product.price.clone());

    let discounted = product
        .discounted_price
        .as_ref()
        .filter(|d| **d < original);

    match discounted {
        Some(discounted) => Pricing {
            discount_percent: discount_percent(&original, discounted),
            current_price: discounted.clone(),
            original_price: original,
            has_discount: true,
        },
        None => Pricing {
            current_price: original.clone(),
            original_price: original,
            discount_percent: 0,
            has_discount: false,
        },
    }
}

fn discount_percent(original: &BigDecimal, discounted: &BigDecimal) -> u8 {
    let original = original.to_f64().unwrap_or(0.0);
    let discounted = discounted.to_f64().unwrap_or(0.0);

    if original <= 0.0 {
        return 0;
    }

    let percent = ((original - discounted) / original * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// An offer counts as active unless it is switched off, and any time
/// window it carries must contain `now`. A missing bound is open.
pub fn offer_is_active(offer: &Offer, now: NaiveDateTime) -> bool {
    if !offer.is_active {
        return false;
    }
    if let Some(start) = offer.start_time {
        if now < start {
            return false;
        }
    }
    if let Some(end) = offer.end_time {
        if now > end {
            return false;
        }
    }
    true
}

/// The offers to badge a product with: active ones, lowest priority
/// value first, capped at `max_count`. The sort is stable so offers
/// with equal priority keep their catalog order.
pub fn active_offers(offers: &[Offer], now: NaiveDateTime, max_count: usize) -> Vec<&Offer> {
    let mut active: Vec<&Offer> = offers
        .iter()
        .filter(|o| offer_is_active(o, now))
        .collect();

    active.sort_by_key(|o| o.priority);
    active.truncate(max_count);
    active
}
