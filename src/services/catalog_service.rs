// src/services/catalog_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProductRepository,
    models::{
        admin::{Page, PageParams},
        catalog::Product,
    },
};

#[derive(Clone)]
pub struct CatalogService {
    product_repo: ProductRepository,
}

impl CatalogService {
    pub fn new(product_repo: ProductRepository) -> Self {
        Self { product_repo }
    }

    /// Cria (id ausente) ou atualiza (id presente) um produto.
    /// Preço que não seja maior que zero é rejeitado sem tocar no banco.
    pub async fn save_product(
        &self,
        id: Option<Uuid>,
        name: &str,
        category: &str,
        price: Decimal,
        state: &str,
        description: Option<&str>,
    ) -> Result<Product, AppError> {
        if price <= Decimal::ZERO {
            return Err(AppError::InvalidPrice);
        }

        match id {
            Some(id) => self
                .product_repo
                .update(id, name, category, price, state, description)
                .await?
                .ok_or(AppError::ProductNotFound),
            None => {
                self.product_repo
                    .create(name, category, price, state, description)
                    .await
            }
        }
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.product_repo.delete_by_id(id).await?;
        if deleted == 0 {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    // Página do catálogo para o painel (filtro de categoria opcional)
    pub async fn list_products(
        &self,
        category: Option<&str>,
        params: &PageParams,
    ) -> Result<Page<Product>, AppError> {
        let content = self
            .product_repo
            .find_page(category, params.size, params.offset())
            .await?;
        let total = self.product_repo.count(category).await?;
        Ok(Page::new(content, params, total))
    }
}
