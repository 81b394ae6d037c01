use crate::data::repos::traits::StoreError;
use async_trait::async_trait;

/// Storage backend for a wishlist, keyed like the cart by an opaque
/// owner id. Same remote/local split as `CartRepository`.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    async fn list(&self, owner: &str) -> Result<Vec<i32>, StoreError>;

    async fn contains(&self, owner: &str, product_id: i32) -> Result<bool, StoreError>;

    async fn add(&self, owner: &str, product_id: i32) -> Result<(), StoreError>;

    async fn remove(&self, owner: &str, product_id: i32) -> Result<(), StoreError>;
}
