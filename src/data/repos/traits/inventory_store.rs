use crate::data::repos::traits::StoreError;
use async_trait::async_trait;

/// Result of one stock decrement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockOutcome {
    /// Stock covered the requested quantity and was decremented.
    Decremented,
    /// Stock was below the requested quantity; nothing was written.
    Insufficient { available: i32 },
    /// No inventory row exists for this product. Inventory tracking is
    /// optional per product, so this is not an error.
    Untracked,
}

/// Inventory bookkeeping for order placement.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Atomically reads the product's stock and decrements it by
    /// `quantity` if sufficient, in a single read-modify-write
    /// transaction. Never leaves stock partially decremented.
    async fn decrement_stock(
        &self,
        product_id: i32,
        quantity: i32,
    ) -> Result<StockOutcome, StoreError>;
}
