// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{DashboardRepository, OrderRepository, ProductRepository, UserRepository},
    services::{
        admin_service::AdminService,
        auth::AuthService,
        catalog_service::CatalogService,
        dashboard_service::DashboardService,
        order_service::OrderService,
        user_service::UserService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub order_service: OrderService,
    pub user_service: UserService,
    pub dashboard_service: DashboardService,
    pub admin_service: AdminService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret.clone());
        let catalog_service = CatalogService::new(product_repo.clone());
        let order_service =
            OrderService::new(order_repo.clone(), product_repo.clone(), db_pool.clone());
        let user_service = UserService::new(user_repo.clone());
        let dashboard_service = DashboardService::new(dashboard_repo.clone(), db_pool.clone());
        let admin_service = AdminService::new(
            catalog_service.clone(),
            order_service.clone(),
            user_service.clone(),
            dashboard_service.clone(),
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            catalog_service,
            order_service,
            user_service,
            dashboard_service,
            admin_service,
        })
    }
}
