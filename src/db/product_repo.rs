// src/db/product_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::catalog::Product};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    // Página do catálogo para o painel, mais recentes primeiro (id descendente).
    // O filtro de categoria é igualdade sem diferenciar maiúsculas/minúsculas.
    pub async fn find_page(
        &self,
        category: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, AppError> {
        let products = match category {
            Some(category) => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT * FROM products
                    WHERE lower(category) = lower($1)
                    ORDER BY id DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(category)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(
                    "SELECT * FROM products ORDER BY id DESC LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(products)
    }

    pub async fn count(&self, category: Option<&str>) -> Result<i64, AppError> {
        let total = match category {
            Some(category) => {
                sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM products WHERE lower(category) = lower($1)",
                )
                .bind(category)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        Ok(total)
    }

    pub async fn create(
        &self,
        name: &str,
        category: &str,
        price: Decimal,
        state: &str,
        description: Option<&str>,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, category, price, state, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(category)
        .bind(price)
        .bind(state)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        category: &str,
        price: Decimal,
        state: &str,
        description: Option<&str>,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $2, category = $3, price = $4, state = $5, description = $6,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(category)
        .bind(price)
        .bind(state)
        .bind(description)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
