// src/services/dashboard_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{DashboardSummary, TopProductEntry},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    pool: PgPool,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        self.repo.get_summary(&self.pool).await
    }

    // Leitura pura: o ranking é recomputado a cada consulta, não há
    // contador materializado para manter.
    pub async fn get_top_products(&self, limit: i64) -> Result<Vec<TopProductEntry>, AppError> {
        self.repo.top_selling_products(&self.pool, limit).await
    }
}
