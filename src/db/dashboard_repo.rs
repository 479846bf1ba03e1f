// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::{
        dashboard::{DashboardSummary, TopProductEntry},
        order::Order,
    },
};

#[derive(Clone)]
pub struct DashboardRepository {
    #[allow(dead_code)]
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // 1. Resumo Geral
    pub async fn get_summary<'e, E>(&self, executor: E) -> Result<DashboardSummary, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Iniciamos uma transação (snapshot consistente dos dados)
        let mut tx = executor.begin().await?;

        // A. Receita total dos pedidos pagos
        let total_sales = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT SUM(total_amount) FROM orders WHERE paid = true",
        )
        .fetch_one(&mut *tx)
        .await?
        .unwrap_or(Decimal::ZERO);

        // B. Os cinco pedidos mais recentes
        let recent_orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders ORDER BY created_at DESC LIMIT 5",
        )
        .fetch_all(&mut *tx)
        .await?;

        // C. Top 5 produtos mais vendidos
        let top_products = self.top_selling_products(&mut *tx, 5).await?;

        // D. Total de contas cadastradas
        let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await?;

        // Fecha a transação (leitura pura, mas commit é clean)
        tx.commit().await?;

        Ok(DashboardSummary {
            total_sales,
            recent_orders,
            top_products,
            total_users,
        })
    }

    // 2. Ranking dos mais vendidos. Conta apenas linhas de pedidos pagos,
    // agrupa por produto e ordena por quantidade vendida (desempate indefinido).
    pub async fn top_selling_products<'e, E>(
        &self,
        executor: E,
        limit: i64,
    ) -> Result<Vec<TopProductEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let data = sqlx::query_as::<_, TopProductEntry>(
            r#"
            SELECT
                p.id AS product_id,
                p.name AS product_name,
                SUM(oi.quantity)::BIGINT AS total_quantity,
                SUM(oi.line_total) AS total_revenue
            FROM order_items oi
            JOIN orders o ON oi.order_id = o.id
            JOIN products p ON oi.product_id = p.id
            WHERE o.paid = true
            GROUP BY p.id, p.name
            ORDER BY SUM(oi.quantity) DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(data)
    }
}
