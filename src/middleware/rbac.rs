// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    models::user::{PermissaoUsuario, User},
};

/// Guardião das operações do painel. O resolver de permissão do usuário
/// (`User::permissao_efetiva`) é a fonte da verdade; aqui só acontece a
/// decisão de liberar ou negar.
pub struct RequireAdmin;

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai o usuário autenticado (injetado pelo auth_guard)
        let user = parts
            .extensions
            .get::<User>()
            .ok_or(AppError::InvalidToken)?;

        // B. Registros antigos sem permissão resolvem para USUARIO
        if user.permissao_efetiva() != PermissaoUsuario::Admin {
            tracing::warn!(
                "Acesso negado ao painel para {} ({})",
                user.email,
                user.authority()
            );
            return Err(AppError::Forbidden);
        }

        Ok(RequireAdmin)
    }
}
