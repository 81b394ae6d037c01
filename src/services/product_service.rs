use std::sync::Arc;

use crate::data::models::product::ProductWithOffers;
use crate::data::repos::traits::catalog_store::CatalogStore;
use crate::services::errors::ProductServiceError;

/// How many offer badges a storefront card shows at most.
pub const MAX_OFFER_BADGES: usize = 2;

/// Read side of the catalog for the storefront.
pub struct ProductService {
    catalog: Arc<dyn CatalogStore>,
}

impl ProductService {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        ProductService { catalog }
    }

    pub async fn get_product(
        &self,
        product_id: i32,
    ) -> Result<ProductWithOffers, ProductServiceError> {
        self.catalog
            .get_product(product_id)
            .await
            .map_err(|_| ProductServiceError::DatabaseError)?
            .ok_or(ProductServiceError::ProductNotFound)
    }

    /// Storefront listing: visible products only.
    pub async fn list_products(&self) -> Result<Vec<ProductWithOffers>, ProductServiceError> {
        self.catalog
            .list_visible()
            .await
            .map_err(|_| ProductServiceError::DatabaseError)
    }
}
