use std::collections::HashMap;

use crate::data::database::Database;
use crate::data::models::offer::Offer;
use crate::data::models::product::{Product, ProductWithOffers};
use crate::data::repos::traits::catalog_store::CatalogStore;
use crate::data::repos::traits::inventory_store::{InventoryStore, StockOutcome};
use crate::data::repos::traits::StoreError;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct ProductRepo {}

impl ProductRepo {
    pub fn new() -> Self {
        ProductRepo {}
    }

    /// Groups the offers of the given products by product id, the same
    /// join-then-bucket shape as order lines.
    fn attach_offers(products: Vec<Product>, offers: Vec<Offer>) -> Vec<ProductWithOffers> {
        let mut map: HashMap<i32, Vec<Offer>> = HashMap::new();

        for offer in offers {
            map.entry(offer.product_id).or_default().push(offer);
        }

        products
            .into_iter()
            .map(|product| {
                let offers = map.remove(&product.product_id).unwrap_or_default();
                ProductWithOffers { product, offers }
            })
            .collect()
    }
}

#[async_trait]
impl CatalogStore for ProductRepo {
    async fn get_product(&self, id: i32) -> Result<Option<ProductWithOffers>, StoreError> {
        use crate::data::models::schema::offers::dsl::{offers, product_id as offer_product_id};
        use crate::data::models::schema::products::dsl::{product_id, products};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let product = products
            .filter(product_id.eq(id))
            .first::<Product>(&mut conn)
            .await
            .optional()?;

        let Some(product) = product else {
            return Ok(None);
        };

        let product_offers = offers
            .filter(offer_product_id.eq(id))
            .load::<Offer>(&mut conn)
            .await?;

        Ok(Some(ProductWithOffers {
            product,
            offers: product_offers,
        }))
    }

    async fn list_visible(&self) -> Result<Vec<ProductWithOffers>, StoreError> {
        use crate::data::models::schema::offers::dsl::{offers, product_id as offer_product_id};
        use crate::data::models::schema::products::dsl::{name, products, visible};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let visible_products = products
            .filter(visible.eq(true))
            .order(name.asc())
            .load::<Product>(&mut conn)
            .await?;

        let ids: Vec<i32> = visible_products.iter().map(|p| p.product_id).collect();

        let all_offers = offers
            .filter(offer_product_id.eq_any(ids))
            .load::<Offer>(&mut conn)
            .await?;

        Ok(Self::attach_offers(visible_products, all_offers))
    }
}

#[async_trait]
impl InventoryStore for ProductRepo {
    async fn decrement_stock(
        &self,
        id: i32,
        requested: i32,
    ) -> Result<StockOutcome, StoreError> {
        use crate::data::models::schema::products::dsl::{product_id, products, stock};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        // Concurrent orders for the same product are serialized by the
        // row lock held for the duration of this transaction.
        let outcome = conn
            .transaction::<_, diesel::result::Error, _>(|connection| {
                async move {
                    let available = products
                        .filter(product_id.eq(id))
                        .select(stock)
                        .for_update()
                        .first::<i32>(connection)
                        .await
                        .optional()?;

                    let Some(available) = available else {
                        return Ok(StockOutcome::Untracked);
                    };

                    if available < requested {
                        return Ok(StockOutcome::Insufficient { available });
                    }

                    diesel::update(products.filter(product_id.eq(id)))
                        .set(stock.eq(stock - requested))
                        .execute(connection)
                        .await?;

                    Ok(StockOutcome::Decremented)
                }
                .scope_boxed()
            })
            .await?;

        Ok(outcome)
    }
}

impl Default for ProductRepo {
    fn default() -> Self {
        Self::new()
    }
}
