// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::order::Order;

// Resumo do painel (os cards do topo + listas rápidas)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    // Receita somada dos pedidos pagos
    pub total_sales: Decimal,

    // Os cinco pedidos mais recentes
    pub recent_orders: Vec<Order>,

    // Ranking dos mais vendidos (apenas pedidos pagos)
    pub top_products: Vec<TopProductEntry>,

    pub total_users: i64,
}

impl DashboardSummary {
    /// Placeholder usado quando o dashboard não é a seção ativa.
    pub fn empty() -> Self {
        Self {
            total_sales: Decimal::ZERO,
            recent_orders: Vec::new(),
            top_products: Vec::new(),
            total_users: 0,
        }
    }
}

// Uma entrada do ranking de produtos mais vendidos
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProductEntry {
    pub product_id: Uuid,
    pub product_name: String,
    pub total_quantity: i64,
    pub total_revenue: Decimal,
}
