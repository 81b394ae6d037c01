use crate::data::models::product::ProductWithOffers;
use crate::data::repos::traits::StoreError;
use async_trait::async_trait;

/// Read side of the product catalog. CRUD lives with the admin tooling
/// and is not part of this surface.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_product(&self, product_id: i32) -> Result<Option<ProductWithOffers>, StoreError>;

    /// Products visible on the storefront, hidden ones excluded.
    async fn list_visible(&self) -> Result<Vec<ProductWithOffers>, StoreError>;
}
