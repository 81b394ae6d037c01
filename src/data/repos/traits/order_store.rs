use crate::data::models::order::{NewOrder, Order, OrderLineSnapshot, OrderWithItems};
use crate::data::repos::traits::StoreError;
use async_trait::async_trait;

/// Storage for orders and their snapshotted lines. Orders are created
/// whole and afterwards only `status`, `notes` and `updated_at` change.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts the order and its lines in one transaction and returns
    /// the generated order id.
    async fn create(
        &self,
        order: NewOrder,
        lines: Vec<OrderLineSnapshot>,
    ) -> Result<i32, StoreError>;

    async fn get(&self, order_id: i32) -> Result<Option<OrderWithItems>, StoreError>;

    /// A user's orders, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>, StoreError>;

    /// All orders, newest first.
    async fn list_all(&self) -> Result<Vec<Order>, StoreError>;

    async fn list_by_status(&self, status: &str) -> Result<Vec<Order>, StoreError>;

    /// Writes the new status and refreshes `updated_at`. Returns false
    /// when no such order exists.
    async fn update_status(&self, order_id: i32, status: &str) -> Result<bool, StoreError>;

    /// Writes the notes and refreshes `updated_at`. Returns false when
    /// no such order exists.
    async fn update_notes(&self, order_id: i32, notes: &str) -> Result<bool, StoreError>;
}
