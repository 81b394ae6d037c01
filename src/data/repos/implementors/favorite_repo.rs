use crate::data::database::Database;
use crate::data::repos::traits::favorite_repository::FavoriteRepository;
use crate::data::repos::traits::StoreError;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

/// Wishlist backend over the remote `favorites` table.
pub struct RemoteFavoriteRepo {}

impl RemoteFavoriteRepo {
    pub fn new() -> Self {
        RemoteFavoriteRepo {}
    }
}

#[async_trait]
impl FavoriteRepository for RemoteFavoriteRepo {
    async fn list(&self, owner: &str) -> Result<Vec<i32>, StoreError> {
        use crate::data::models::schema::favorites::dsl::{
            created_at, favorites, owner_id, product_id,
        };

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let ids = favorites
            .filter(owner_id.eq(owner))
            .order(created_at.asc())
            .select(product_id)
            .load::<i32>(&mut conn)
            .await?;

        Ok(ids)
    }

    async fn contains(&self, owner: &str, product: i32) -> Result<bool, StoreError> {
        use crate::data::models::schema::favorites::dsl::{favorites, owner_id, product_id};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let found = favorites
            .filter(owner_id.eq(owner))
            .filter(product_id.eq(product))
            .select(product_id)
            .first::<i32>(&mut conn)
            .await
            .optional()?;

        Ok(found.is_some())
    }

    async fn add(&self, owner: &str, product: i32) -> Result<(), StoreError> {
        use crate::data::models::schema::favorites::dsl::{favorites, owner_id, product_id};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        diesel::replace_into(favorites)
            .values((owner_id.eq(owner), product_id.eq(product)))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    async fn remove(&self, owner: &str, product: i32) -> Result<(), StoreError> {
        use crate::data::models::schema::favorites::dsl::{favorites, owner_id, product_id};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        diesel::delete(
            favorites
                .filter(owner_id.eq(owner))
                .filter(product_id.eq(product)),
        )
        .execute(&mut conn)
        .await?;

        Ok(())
    }
}

impl Default for RemoteFavoriteRepo {
    fn default() -> Self {
        Self::new()
    }
}
