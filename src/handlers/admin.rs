// src/handlers/admin.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::RequireAdmin,
    models::order::{NewOrderLine, OrderShippingStatus},
};

// ---
// Validações customizadas
// ---
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("O campo não pode ficar em branco.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O preço deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Query: visão composta do painel
// ---
// Os tokens chegam crus da query string; o parse tolerante acontece na
// fachada. Página/tamanho fora da faixa são saneados, nunca rejeitados.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PanelQuery {
    // Seção ativa do painel (dashboard, products, orders, users)
    pub section: Option<String>,

    // PRODUCTS FILTERS
    pub category: Option<String>,
    #[serde(default)]
    pub p_page: i64,
    #[serde(default = "default_page_size")]
    pub p_size: i64,

    // ORDERS FILTERS
    pub shipping_status: Option<String>,
    pub paid: Option<String>,
    #[serde(default)]
    pub o_page: i64,
    #[serde(default = "default_page_size")]
    pub o_size: i64,

    // USERS FILTER
    pub user_status: Option<String>,
}

fn default_page_size() -> i64 {
    10
}

// ---
// Handler: painel administrativo
// ---
#[utoipa::path(
    get,
    path = "/api/admin",
    tag = "Admin",
    params(PanelQuery),
    responses(
        (status = 200, description = "Visão composta do painel conforme a seção ativa"),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Sem permissão de ADMIN")
    ),
    security(("api_jwt" = []))
)]
pub async fn panel(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Query(query): Query<PanelQuery>,
) -> Result<impl IntoResponse, AppError> {
    let view = app_state
        .admin_service
        .panel(
            query.section.as_deref(),
            query.category.as_deref(),
            query.p_page,
            query.p_size,
            query.shipping_status.as_deref(),
            query.paid.as_deref(),
            query.o_page,
            query.o_size,
            query.user_status.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(view)))
}

// ---
// Query: ranking dos mais vendidos
// ---
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopProductsQuery {
    // Quantas posições do ranking retornar
    #[serde(default = "default_top_limit")]
    pub limit: i64,
}

fn default_top_limit() -> i64 {
    5
}

#[utoipa::path(
    get,
    path = "/api/admin/top-products",
    tag = "Admin",
    params(TopProductsQuery),
    responses(
        (status = 200, description = "Ranking dos produtos mais vendidos (apenas pedidos pagos)"),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Sem permissão de ADMIN")
    ),
    security(("api_jwt" = []))
)]
pub async fn top_products(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Query(query): Query<TopProductsQuery>,
) -> Result<impl IntoResponse, AppError> {
    // Limite fora da faixa é saneado, nunca rejeitado
    let limit = if query.limit <= 0 { 5 } else { query.limit };

    let ranking = app_state.dashboard_service.get_top_products(limit).await?;
    Ok((StatusCode::OK, Json(ranking)))
}

// ---
// Payload: salvar produto (cria sem id, atualiza com id)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveProductPayload {
    pub id: Option<Uuid>,

    #[validate(custom(function = "validate_not_blank"), length(max = 120, message = "O nome deve ter no máximo 120 caracteres."))]
    pub name: String,

    #[validate(custom(function = "validate_not_blank"), length(max = 60, message = "A categoria deve ter no máximo 60 caracteres."))]
    pub category: String,

    #[validate(custom(function = "validate_positive"))]
    pub price: Decimal,

    #[validate(custom(function = "validate_not_blank"))]
    pub state: String,

    pub description: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    tag = "Admin",
    request_body = SaveProductPayload,
    responses(
        (status = 200, description = "Produto salvo"),
        (status = 400, description = "Preço inválido ou campos em branco"),
        (status = 404, description = "Produto não encontrado (atualização)")
    ),
    security(("api_jwt" = []))
)]
pub async fn save_product(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Json(payload): Json<SaveProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let product = app_state
        .catalog_service
        .save_product(
            payload.id,
            &payload.name,
            &payload.category,
            payload.price,
            &payload.state,
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(product)))
}

// Busca usada pela tela de edição; ausência vira 404 explícito para a tela
// cair no formulário de criação
#[utoipa::path(
    get,
    path = "/api/admin/products/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto encontrado"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state.catalog_service.get_product(id).await?;
    Ok((StatusCode::OK, Json(product)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 204, description = "Produto excluído"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payload: salvar usuário pelo painel
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserPayload {
    pub id: Option<Uuid>,

    #[validate(custom(function = "validate_not_blank"), length(max = 60, message = "O nome deve ter no máximo 60 caracteres."))]
    pub first_name: String,

    #[validate(custom(function = "validate_not_blank"), length(max = 60, message = "O sobrenome deve ter no máximo 60 caracteres."))]
    pub last_name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(custom(function = "validate_not_blank"), length(max = 20, message = "O telefone deve ter no máximo 20 caracteres."))]
    pub phone: String,

    // Token livre; irreconhecível cai em ATIVO
    pub status_usuario: Option<String>,

    // Senha só é alterada quando vier preenchida
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "Admin",
    request_body = SaveUserPayload,
    responses(
        (status = 200, description = "Usuário salvo"),
        (status = 400, description = "Campos inválidos ou senhas que não conferem"),
        (status = 404, description = "Usuário não encontrado (atualização)"),
        (status = 409, description = "E-mail já está em uso")
    ),
    security(("api_jwt" = []))
)]
pub async fn save_user(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Json(payload): Json<SaveUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // A confirmação só é exigida quando a senha veio preenchida
    if let Some(password) = payload.password.as_deref().filter(|p| !p.trim().is_empty()) {
        if Some(password) != payload.confirm_password.as_deref() {
            return Err(AppError::PasswordMismatch);
        }
    }

    let user = app_state
        .user_service
        .save_user(
            payload.id,
            &payload.first_name,
            &payload.last_name,
            &payload.email,
            &payload.phone,
            payload.status_usuario.as_deref(),
            payload.password.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(user)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 204, description = "Usuário excluído"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Payloads: pedidos
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 120, message = "O nome do cliente deve ter no máximo 120 caracteres."))]
    pub customer_name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub customer_email: Option<String>,

    // Pedido pode nascer vazio (total zero) e receber linhas depois
    #[serde(default)]
    pub items: Vec<NewOrderLine>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemQuantityPayload {
    // Valores menores que 1 são coagidos para 1, não rejeitados
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShippingStatusPayload {
    pub shipping_status: OrderShippingStatus,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePaidPayload {
    pub paid: bool,
}

#[utoipa::path(
    post,
    path = "/api/admin/orders",
    tag = "Admin",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado com o total derivado das linhas"),
        (status = 404, description = "Produto de alguma linha não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let order = app_state
        .order_service
        .create_order(
            &payload.customer_name,
            payload.customer_email.as_deref(),
            &payload.items,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders/{id}",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido com as linhas"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.get_order(id).await?;
    Ok((StatusCode::OK, Json(order)))
}

#[utoipa::path(
    post,
    path = "/api/admin/orders/{id}/items",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = NewOrderLine,
    responses(
        (status = 201, description = "Linha adicionada; pedido com o total atualizado"),
        (status = 404, description = "Pedido ou produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_order_item(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewOrderLine>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.add_item(id, &payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/items/{item_id}",
    tag = "Admin",
    params(
        ("id" = Uuid, Path, description = "ID do pedido"),
        ("item_id" = Uuid, Path, description = "ID da linha")
    ),
    request_body = UpdateItemQuantityPayload,
    responses(
        (status = 200, description = "Linha atualizada; pedido com o total atualizado"),
        (status = 404, description = "Pedido ou linha não encontrados")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order_item(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateItemQuantityPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .update_item_quantity(id, item_id, payload.quantity)
        .await?;
    Ok((StatusCode::OK, Json(order)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/orders/{id}/items/{item_id}",
    tag = "Admin",
    params(
        ("id" = Uuid, Path, description = "ID do pedido"),
        ("item_id" = Uuid, Path, description = "ID da linha")
    ),
    responses(
        (status = 200, description = "Linha removida; pedido com o total atualizado"),
        (status = 404, description = "Pedido ou linha não encontrados")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_order_item(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Path((id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.remove_item(id, item_id).await?;
    Ok((StatusCode::OK, Json(order)))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/shipping-status",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = UpdateShippingStatusPayload,
    responses(
        (status = 200, description = "Status de envio atualizado"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_shipping_status(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateShippingStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .set_shipping_status(id, payload.shipping_status)
        .await?;
    Ok((StatusCode::OK, Json(order)))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/paid",
    tag = "Admin",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = UpdatePaidPayload,
    responses(
        (status = 200, description = "Flag de pagamento atualizada"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_paid(
    State(app_state): State<AppState>,
    _guard: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePaidPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.set_paid(id, payload.paid).await?;
    Ok((StatusCode::OK, Json(order)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preco_zero_ou_negativo_e_rejeitado() {
        assert!(validate_positive(&Decimal::ZERO).is_err());
        assert!(validate_positive(&"-5.00".parse().unwrap()).is_err());
        assert!(validate_positive(&"0.01".parse().unwrap()).is_ok());
    }

    #[test]
    fn campo_so_com_espacos_conta_como_em_branco() {
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" Baltazar ").is_ok());
    }
}
