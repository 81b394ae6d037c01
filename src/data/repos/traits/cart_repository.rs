use crate::data::models::cart_item::CartLine;
use crate::data::repos::traits::StoreError;
use async_trait::async_trait;

/// Storage backend for a cart, keyed by an opaque owner id (the user's
/// uid when signed in, the device's guest id otherwise).
///
/// Two implementors exist: the remote `cart_items` table and the local
/// JSON fallback store. The cart service picks between them per call
/// based on the session, so neither implementor knows about sessions.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn lines(&self, owner: &str) -> Result<Vec<CartLine>, StoreError>;

    async fn get_line(&self, owner: &str, product_id: i32)
        -> Result<Option<CartLine>, StoreError>;

    /// Inserts the line, or replaces it wholesale if one already exists
    /// for the same product.
    async fn upsert_line(&self, owner: &str, line: CartLine) -> Result<(), StoreError>;

    /// Replaces the quantity of an existing line. A line with quantity
    /// zero must never exist, so `quantity` is expected to be >= 1;
    /// callers delete instead of setting zero.
    async fn set_quantity(
        &self,
        owner: &str,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), StoreError>;

    async fn remove_line(&self, owner: &str, product_id: i32) -> Result<(), StoreError>;

    async fn clear(&self, owner: &str) -> Result<(), StoreError>;

    /// Overwrites the whole cart with `lines`. Used to refresh the
    /// local mirror from the remote store after a remote mutation.
    async fn replace_all(&self, owner: &str, lines: &[CartLine]) -> Result<(), StoreError>;
}
