// src/db/order_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::order::{Order, OrderItem, OrderShippingStatus},
};

// Repositório de pedidos. Os métodos recebem o executor para que o service
// consiga compor várias escritas na mesma transação (linha + total juntos).
#[derive(Clone)]
pub struct OrderRepository {
    #[allow(dead_code)]
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(&self, executor: E, order: &Order) -> Result<Order, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (id, customer_name, customer_email, shipping_status, paid, total_amount)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(order.id)
        .bind(&order.customer_name)
        .bind(&order.customer_email)
        .bind(order.shipping_status)
        .bind(order.paid)
        .bind(order.total_amount)
        .fetch_one(executor)
        .await?;
        Ok(created)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(order)
    }

    // Trava o pedido enquanto as linhas e o total são reescritos
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(order)
    }

    pub async fn find_items<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<Vec<OrderItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let items = sqlx::query_as::<_, OrderItem>(
            "SELECT * FROM order_items WHERE order_id = $1 ORDER BY id ASC",
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;
        Ok(items)
    }

    pub async fn insert_item<'e, E>(&self, executor: E, item: &OrderItem) -> Result<OrderItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, OrderItem>(
            r#"
            INSERT INTO order_items (id, order_id, product_id, quantity, unit_price, line_total)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(item.id)
        .bind(item.order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(item.line_total)
        .fetch_one(executor)
        .await?;
        Ok(created)
    }

    pub async fn update_item<'e, E>(&self, executor: E, item: &OrderItem) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE order_items SET quantity = $2, line_total = $3 WHERE id = $1")
            .bind(item.id)
            .bind(item.quantity)
            .bind(item.line_total)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn delete_item<'e, E>(&self, executor: E, item_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM order_items WHERE id = $1")
            .bind(item_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    // O total nunca é gravado direto pelos handlers; só o service passa por aqui,
    // sempre com o valor recém-derivado das linhas.
    pub async fn update_total<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        total_amount: Decimal,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE orders SET total_amount = $2 WHERE id = $1")
            .bind(order_id)
            .bind(total_amount)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn update_shipping_status<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        status: OrderShippingStatus,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders SET shipping_status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(order_id)
        .bind(status)
        .fetch_optional(executor)
        .await?;
        Ok(order)
    }

    pub async fn update_paid<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        paid: bool,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            "UPDATE orders SET paid = $2 WHERE id = $1 RETURNING *",
        )
        .bind(order_id)
        .bind(paid)
        .fetch_optional(executor)
        .await?;
        Ok(order)
    }

    // Página de pedidos do painel, mais recentes primeiro. Os dois filtros
    // compõem com AND quando ambos presentes; cada combinação tem sua consulta.
    pub async fn find_page<'e, E>(
        &self,
        executor: E,
        shipping: Option<OrderShippingStatus>,
        paid: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let orders = match (shipping, paid) {
            (Some(shipping), Some(paid)) => {
                sqlx::query_as::<_, Order>(
                    r#"
                    SELECT * FROM orders
                    WHERE shipping_status = $1 AND paid = $2
                    ORDER BY created_at DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(shipping)
                .bind(paid)
                .bind(limit)
                .bind(offset)
                .fetch_all(executor)
                .await?
            }
            (Some(shipping), None) => {
                sqlx::query_as::<_, Order>(
                    r#"
                    SELECT * FROM orders
                    WHERE shipping_status = $1
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(shipping)
                .bind(limit)
                .bind(offset)
                .fetch_all(executor)
                .await?
            }
            (None, Some(paid)) => {
                sqlx::query_as::<_, Order>(
                    r#"
                    SELECT * FROM orders
                    WHERE paid = $1
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(paid)
                .bind(limit)
                .bind(offset)
                .fetch_all(executor)
                .await?
            }
            (None, None) => {
                sqlx::query_as::<_, Order>(
                    "SELECT * FROM orders ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(executor)
                .await?
            }
        };
        Ok(orders)
    }

    pub async fn count<'e, E>(
        &self,
        executor: E,
        shipping: Option<OrderShippingStatus>,
        paid: Option<bool>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total = match (shipping, paid) {
            (Some(shipping), Some(paid)) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM orders WHERE shipping_status = $1 AND paid = $2",
                )
                .bind(shipping)
                .bind(paid)
                .fetch_one(executor)
                .await?
            }
            (Some(shipping), None) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM orders WHERE shipping_status = $1",
                )
                .bind(shipping)
                .fetch_one(executor)
                .await?
            }
            (None, Some(paid)) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE paid = $1")
                    .bind(paid)
                    .fetch_one(executor)
                    .await?
            }
            (None, None) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
                    .fetch_one(executor)
                    .await?
            }
        };
        Ok(total)
    }
}
