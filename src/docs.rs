// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Painel ---
        handlers::admin::panel,
        handlers::admin::top_products,
        handlers::admin::save_product,
        handlers::admin::get_product,
        handlers::admin::delete_product,
        handlers::admin::save_user,
        handlers::admin::delete_user,
        handlers::admin::create_order,
        handlers::admin::get_order,
        handlers::admin::add_order_item,
        handlers::admin::update_order_item,
        handlers::admin::remove_order_item,
        handlers::admin::update_shipping_status,
        handlers::admin::update_paid,
    ),
    components(
        schemas(
            // --- Catálogo ---
            models::catalog::Product,

            // --- Pedidos ---
            models::order::Order,
            models::order::OrderItem,
            models::order::OrderShippingStatus,
            models::order::NewOrderLine,

            // --- Usuários ---
            models::user::User,
            models::user::StatusUsuario,
            models::user::PermissaoUsuario,
            models::user::RegisterUserPayload,
            models::user::LoginUserPayload,
            models::user::AuthResponse,

            // --- Painel ---
            models::admin::AdminSection,
            models::admin::AdminPanelView,
            models::admin::Page<models::catalog::Product>,
            models::admin::Page<models::order::Order>,
            models::dashboard::DashboardSummary,
            models::dashboard::TopProductEntry,

            // --- Payloads ---
            handlers::admin::SaveProductPayload,
            handlers::admin::SaveUserPayload,
            handlers::admin::CreateOrderPayload,
            handlers::admin::UpdateItemQuantityPayload,
            handlers::admin::UpdateShippingStatusPayload,
            handlers::admin::UpdatePaidPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Cadastro"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Admin", description = "Painel Administrativo da Loja")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
