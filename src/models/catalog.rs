// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Produto do catálogo da loja. Alterado apenas pelas operações explícitas
/// de salvar do painel administrativo.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,

    // Texto livre, filtrado sem diferenciar maiúsculas/minúsculas
    pub category: String,

    // Precisa ser > 0 para persistir
    pub price: Decimal,

    // Flag de ciclo de vida no estilo "ativo"/"inativo"
    pub state: String,

    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
