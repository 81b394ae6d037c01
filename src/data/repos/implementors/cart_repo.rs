use crate::data::database::Database;
use crate::data::models::cart_item::{CartItemRow, CartLine, NewCartItem};
use crate::data::repos::traits::cart_repository::CartRepository;
use crate::data::repos::traits::StoreError;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

/// Cart backend over the remote `cart_items` table, one row per
/// (owner, product).
pub struct RemoteCartRepo {}

impl RemoteCartRepo {
    pub fn new() -> Self {
        RemoteCartRepo {}
    }
}

#[async_trait]
impl CartRepository for RemoteCartRepo {
    async fn lines(&self, owner: &str) -> Result<Vec<CartLine>, StoreError> {
        use crate::data::models::schema::cart_items::dsl::{added_at, cart_items, owner_id};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let rows = cart_items
            .filter(owner_id.eq(owner))
            .order(added_at.asc())
            .load::<CartItemRow>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(CartLine::from).collect())
    }

    async fn get_line(
        &self,
        owner: &str,
        product: i32,
    ) -> Result<Option<CartLine>, StoreError> {
        use crate::data::models::schema::cart_items::dsl::{cart_items, owner_id, product_id};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let row = cart_items
            .filter(owner_id.eq(owner))
            .filter(product_id.eq(product))
            .first::<CartItemRow>(&mut conn)
            .await
            .optional()?;

        Ok(row.map(CartLine::from))
    }

    async fn upsert_line(&self, owner: &str, line: CartLine) -> Result<(), StoreError> {
        use crate::data::models::schema::cart_items::dsl::cart_items;

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let item = NewCartItem {
            owner_id: owner,
            product_id: line.product_id,
            name: &line.name,
            unit: line.unit.as_deref(),
            image_uri: line.image_uri.as_deref(),
            price: &line.price,
            quantity: line.quantity,
        };

        diesel::replace_into(cart_items)
            .values(&item)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn set_quantity(
        &self,
        owner: &str,
        product: i32,
        new_quantity: i32,
    ) -> Result<(), StoreError> {
        use crate::data::models::schema::cart_items::dsl::{
            cart_items, owner_id, product_id, quantity,
        };

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        diesel::update(
            cart_items
                .filter(owner_id.eq(owner))
                .filter(product_id.eq(product)),
        )
        .set(quantity.eq(new_quantity))
        .execute(&mut conn)
        .await?;

        Ok(())
    }

    async fn remove_line(&self, owner: &str, product: i32) -> Result<(), StoreError> {
        use crate::data::models::schema::cart_items::dsl::{cart_items, owner_id, product_id};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        diesel::delete(
            cart_items
                .filter(owner_id.eq(owner))
                .filter(product_id.eq(product)),
        )
        .execute(&mut conn)
        .await?;

        Ok(())
    }

    async fn clear(&self, owner: &str) -> Result<(), StoreError> {
        use crate::data::models::schema::cart_items::dsl::{cart_items, owner_id};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        diesel::delete(cart_items.filter(owner_id.eq(owner)))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn replace_all(&self, owner: &str, lines: &[CartLine]) -> Result<(), StoreError> {
        use crate::data::models::schema::cart_items::dsl::{cart_items, owner_id};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let owner = owner.to_string();
        let lines = lines.to_vec();

        conn.transaction::<_, diesel::result::Error, _>(|connection| {
            async move {
                diesel::delete(cart_items.filter(owner_id.eq(&owner)))
                    .execute(connection)
                    .await?;

                let items: Vec<NewCartItem<'_>> = lines
                    .iter()
                    .map(|line| NewCartItem {
                        owner_id: &owner,
                        product_id: line.product_id,
                        name: &line.name,
                        unit: line.unit.as_deref(),
                        image_uri: line.image_uri.as_deref(),
                        price: &line.price,
                        quantity: line.quantity,
                    })
                    .collect();

                diesel::insert_into(cart_items)
                    .values(&items)
                    .execute(connection)
                    .await?;

                Ok(())
            }
            .scope_boxed()
        })
        .await?;

        Ok(())
    }
}

impl Default for RemoteCartRepo {
    fn default() -> Self {
        Self::new()
    }
}
