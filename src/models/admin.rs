// src/models/admin.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{
    catalog::Product,
    dashboard::DashboardSummary,
    order::Order,
    user::User,
};

// Seções do painel administrativo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AdminSection {
    Dashboard,
    Products,
    Orders,
    Users,
}

impl AdminSection {
    /// Normaliza o token de seção; qualquer coisa fora da lista vira dashboard.
    pub fn parse(token: Option<&str>) -> Self {
        match token.unwrap_or("").trim().to_lowercase().as_str() {
            "products" => Self::Products,
            "orders" => Self::Orders,
            "users" => Self::Users,
            _ => Self::Dashboard,
        }
    }
}

/// Parser tolerante do filtro "pago" do painel.
/// Aceita os tokens literais do formulário; qualquer outra coisa vira "sem filtro".
pub fn parse_paid_filter(token: &str) -> Option<bool> {
    match token.trim().to_lowercase().as_str() {
        "true" | "1" | "pago" => Some(true),
        "false" | "0" | "nao" | "não" => Some(false),
        _ => None,
    }
}

/// Parâmetros de paginação já saneados: página nunca negativa,
/// tamanho nunca menor que 1 (padrão 10). Nunca rejeita, só ajusta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: i64,
    pub size: i64,
}

pub const DEFAULT_PAGE_SIZE: i64 = 10;

impl PageParams {
    pub fn sanitized(page: i64, size: i64) -> Self {
        Self {
            page: page.max(0),
            size: if size <= 0 { DEFAULT_PAGE_SIZE } else { size },
        }
    }

    pub fn offset(&self) -> i64 {
        self.page * self.size
    }
}

// Fatia paginada devolvida pelas consultas do painel
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, params: &PageParams, total_elements: i64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + params.size - 1) / params.size
        };
        Self {
            content,
            page: params.page,
            size: params.size,
            total_elements,
            total_pages,
        }
    }
}

/// Visão composta do painel: todas as seções numa resposta só, com as
/// seções inativas preenchidas com listas vazias/zeros para a tela não
/// disparar varreduras desnecessárias.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminPanelView {
    pub active_section: AdminSection,

    // Ecos dos filtros aplicados ("" quando sem filtro)
    pub selected_category: String,
    pub selected_shipping_status: String,
    pub selected_paid: String,
    pub selected_user_status: String,

    pub products: Page<Product>,
    pub orders: Page<Order>,
    pub users: Vec<User>,
    pub dashboard: DashboardSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filtro_pago_aceita_os_tokens_do_formulario() {
        assert_eq!(parse_paid_filter("true"), Some(true));
        assert_eq!(parse_paid_filter("TRUE"), Some(true));
        assert_eq!(parse_paid_filter("1"), Some(true));
        assert_eq!(parse_paid_filter("Pago"), Some(true));

        assert_eq!(parse_paid_filter("false"), Some(false));
        assert_eq!(parse_paid_filter("0"), Some(false));
        assert_eq!(parse_paid_filter("nao"), Some(false));
        assert_eq!(parse_paid_filter("NÃO"), Some(false));
    }

    #[test]
    fn filtro_pago_e_total_para_qualquer_token() {
        assert_eq!(parse_paid_filter(""), None);
        assert_eq!(parse_paid_filter("   "), None);
        assert_eq!(parse_paid_filter("talvez"), None);
        assert_eq!(parse_paid_filter("2"), None);
    }

    #[test]
    fn paginacao_e_saneada_em_vez_de_rejeitada() {
        let params = PageParams::sanitized(-3, 0);
        assert_eq!(params.page, 0);
        assert_eq!(params.size, DEFAULT_PAGE_SIZE);

        let params = PageParams::sanitized(2, 25);
        assert_eq!(params.page, 2);
        assert_eq!(params.size, 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn pagina_calcula_o_total_de_paginas() {
        let params = PageParams::sanitized(0, 10);
        let page = Page::new(vec![1, 2, 3], &params, 23);
        assert_eq!(page.total_pages, 3);

        let empty: Page<i32> = Page::new(vec![], &params, 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn secao_desconhecida_vira_dashboard() {
        assert_eq!(AdminSection::parse(Some("products")), AdminSection::Products);
        assert_eq!(AdminSection::parse(Some("  Orders ")), AdminSection::Orders);
        assert_eq!(AdminSection::parse(Some("users")), AdminSection::Users);
        assert_eq!(AdminSection::parse(Some("financeiro")), AdminSection::Dashboard);
        assert_eq!(AdminSection::parse(None), AdminSection::Dashboard);
    }
}
