// src/services/admin_service.rs

use crate::{
    common::error::AppError,
    models::{
        admin::{parse_paid_filter, AdminPanelView, AdminSection, PageParams},
        dashboard::DashboardSummary,
        order::OrderShippingStatus,
        user::StatusUsuario,
    },
    services::{
        catalog_service::CatalogService,
        dashboard_service::DashboardService,
        order_service::OrderService,
        user_service::UserService,
    },
};

// A fachada de consultas do painel: recebe os tokens crus da query string,
// parseia tudo de forma tolerante e compõe as visões das quatro seções.
// Nenhum token malformado vira erro; vira "sem filtro".
#[derive(Clone)]
pub struct AdminService {
    catalog_service: CatalogService,
    order_service: OrderService,
    user_service: UserService,
    dashboard_service: DashboardService,
}

impl AdminService {
    pub fn new(
        catalog_service: CatalogService,
        order_service: OrderService,
        user_service: UserService,
        dashboard_service: DashboardService,
    ) -> Self {
        Self {
            catalog_service,
            order_service,
            user_service,
            dashboard_service,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn panel(
        &self,
        section: Option<&str>,
        category: Option<&str>,
        p_page: i64,
        p_size: i64,
        shipping_status: Option<&str>,
        paid: Option<&str>,
        o_page: i64,
        o_size: i64,
        user_status: Option<&str>,
    ) -> Result<AdminPanelView, AppError> {
        let active_section = AdminSection::parse(section);

        // --- PRODUTOS (paginado) ---
        let selected_category = category.unwrap_or("").trim().to_uppercase();
        let category_filter = if selected_category.is_empty() {
            None
        } else {
            Some(selected_category.as_str())
        };
        let p_params = PageParams::sanitized(p_page, p_size);
        let products = self
            .catalog_service
            .list_products(category_filter, &p_params)
            .await?;

        // --- PEDIDOS (paginado, filtros compõem com AND) ---
        let parsed_shipping = shipping_status.and_then(OrderShippingStatus::parse_filter);
        let parsed_paid = paid.and_then(parse_paid_filter);
        let o_params = PageParams::sanitized(o_page, o_size);
        let orders = self
            .order_service
            .list_orders(parsed_shipping, parsed_paid, &o_params)
            .await?;

        // --- USUÁRIOS (materializado só com a seção ativa) ---
        let parsed_status = user_status.and_then(StatusUsuario::parse_filter);
        let users = if active_section == AdminSection::Users {
            self.user_service.list_users(parsed_status).await?
        } else {
            Vec::new()
        };

        // --- DASHBOARD (só na seção ativa; evita varrer as tabelas à toa) ---
        let dashboard = if active_section == AdminSection::Dashboard {
            self.dashboard_service.get_summary().await?
        } else {
            DashboardSummary::empty()
        };

        Ok(AdminPanelView {
            active_section,
            selected_category,
            selected_shipping_status: parsed_shipping
                .map(|s| s.as_str().to_owned())
                .unwrap_or_default(),
            selected_paid: parsed_paid.map(|p| p.to_string()).unwrap_or_default(),
            selected_user_status: parsed_status
                .map(|s| s.as_str().to_owned())
                .unwrap_or_default(),
            products,
            orders,
            users,
            dashboard,
        })
    }
}
