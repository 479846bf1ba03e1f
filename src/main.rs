// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Painel administrativo: além do auth_guard, cada handler exige ADMIN
    // via extrator RequireAdmin
    let admin_routes = Router::new()
        .route("/", get(handlers::admin::panel))
        .route("/top-products", get(handlers::admin::top_products))
        .route("/products", post(handlers::admin::save_product))
        .route(
            "/products/{id}",
            get(handlers::admin::get_product).delete(handlers::admin::delete_product),
        )
        .route("/users", post(handlers::admin::save_user))
        .route("/users/{id}", delete(handlers::admin::delete_user))
        .route("/orders", post(handlers::admin::create_order))
        .route("/orders/{id}", get(handlers::admin::get_order))
        .route("/orders/{id}/items", post(handlers::admin::add_order_item))
        .route(
            "/orders/{id}/items/{item_id}",
            put(handlers::admin::update_order_item).delete(handlers::admin::remove_order_item),
        )
        .route(
            "/orders/{id}/shipping-status",
            put(handlers::admin::update_shipping_status),
        )
        .route("/orders/{id}/paid", put(handlers::admin::update_paid))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/admin", admin_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
