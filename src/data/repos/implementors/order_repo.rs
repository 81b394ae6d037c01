use crate::data::database::Database;
use crate::data::models::order::{
    NewOrder, NewOrderItem, Order, OrderItem, OrderLineSnapshot, OrderWithItems,
};
use crate::data::repos::traits::order_store::OrderStore;
use crate::data::repos::traits::StoreError;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct OrderRepo {}

impl OrderRepo {
    pub fn new() -> Self {
        OrderRepo {}
    }
}

#[async_trait]
impl OrderStore for OrderRepo {
    async fn create(
        &self,
        new_order: NewOrder,
        lines: Vec<OrderLineSnapshot>,
    ) -> Result<i32, StoreError> {
        use crate::data::models::schema::order_items::dsl::order_items;
        use crate::data::models::schema::orders::dsl::orders;

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let new_id = conn
            .transaction::<_, diesel::result::Error, _>(|connection| {
                async move {
                    diesel::insert_into(orders)
                        .values(&new_order)
                        .execute(connection)
                        .await?;

                    let new_id: i32 = diesel::select(diesel::dsl::sql::<
                        diesel::sql_types::Integer,
                    >("LAST_INSERT_ID()"))
                    .get_result(connection)
                    .await?;

                    let items: Vec<NewOrderItem> = lines
                        .into_iter()
                        .map(|line| NewOrderItem {
                            order_id: new_id,
                            product_id: line.product_id,
                            name: line.name,
                            unit: line.unit,
                            image_uri: line.image_uri,
                            quantity: line.quantity,
                            unit_price: line.unit_price,
                            line_total: line.line_total,
                        })
                        .collect();

                    diesel::insert_into(order_items)
                        .values(&items)
                        .execute(connection)
                        .await?;

                    Ok(new_id)
                }
                .scope_boxed()
            })
            .await?;

        Ok(new_id)
    }

    async fn get(&self, id: i32) -> Result<Option<OrderWithItems>, StoreError> {
        use crate::data::models::schema::order_items::dsl::{
            order_id as item_order_id, order_items,
        };
        use crate::data::models::schema::orders::dsl::{order_id, orders};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let order = orders
            .filter(order_id.eq(id))
            .first::<Order>(&mut conn)
            .await
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = order_items
            .filter(item_order_id.eq(id))
            .load::<OrderItem>(&mut conn)
            .await?;

        Ok(Some(OrderWithItems { order, items }))
    }

    async fn list_for_user(&self, uid: &str) -> Result<Vec<Order>, StoreError> {
        use crate::data::models::schema::orders::dsl::{created_at, orders, user_id};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let rows = orders
            .filter(user_id.eq(uid))
            .order(created_at.desc())
            .load::<Order>(&mut conn)
            .await?;

        Ok(rows)
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreError> {
        use crate::data::models::schema::orders::dsl::{created_at, orders};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let rows = orders
            .order(created_at.desc())
            .load::<Order>(&mut conn)
            .await?;

        Ok(rows)
    }

    async fn list_by_status(&self, status_query: &str) -> Result<Vec<Order>, StoreError> {
        use crate::data::models::schema::orders::dsl::{created_at, orders, status};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let rows = orders
            .filter(status.eq(status_query))
            .order(created_at.desc())
            .load::<Order>(&mut conn)
            .await?;

        Ok(rows)
    }

    async fn update_status(&self, id: i32, new_status: &str) -> Result<bool, StoreError> {
        use crate::data::models::schema::orders::dsl::{order_id, orders, status, updated_at};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let affected = diesel::update(orders.filter(order_id.eq(id)))
            .set((
                status.eq(new_status),
                updated_at.eq(diesel::dsl::now.nullable()),
            ))
            .execute(&mut conn)
            .await?;

        Ok(affected > 0)
    }

    async fn update_notes(&self, id: i32, new_notes: &str) -> Result<bool, StoreError> {
        use crate::data::models::schema::orders::dsl::{notes, order_id, orders, updated_at};

        let db = Database::new().await;
        let mut conn = db.get_connection().await?;

        let affected = diesel::update(orders.filter(order_id.eq(id)))
            .set((
                notes.eq(new_notes),
                updated_at.eq(diesel::dsl::now.nullable()),
            ))
            .execute(&mut conn)
            .await?;

        Ok(affected > 0)
    }
}

impl Default for OrderRepo {
    fn default() -> Self {
        Self::new()
    }
}
