// src/services/user_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::user::{normalize_email, PermissaoUsuario, StatusUsuario, User},
    services::auth::hash_password,
};

// Gestão de contas pelo painel administrativo. O cadastro público (signup)
// fica no AuthService; aqui é o CRUD do administrador.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    pub fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Cria (id ausente) ou atualiza (id presente) uma conta.
    /// O token de status é parseado de forma tolerante, caindo em ATIVO.
    /// A senha só é re-hasheada quando veio preenchida.
    #[allow(clippy::too_many_arguments)]
    pub async fn save_user(
        &self,
        id: Option<Uuid>,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        status_token: Option<&str>,
        password: Option<&str>,
    ) -> Result<User, AppError> {
        let status = status_token
            .and_then(StatusUsuario::parse_filter)
            .unwrap_or(StatusUsuario::Ativo);

        let email_norm = normalize_email(email);

        // Senha em branco conta como "não veio"
        let password = password.filter(|p| !p.trim().is_empty());

        match id {
            Some(id) => {
                // Atualização exige que a conta exista
                self.user_repo
                    .find_by_id(id)
                    .await?
                    .ok_or(AppError::UserNotFound)?;

                let password_hash = match password {
                    Some(password) => Some(hash_password(password).await?),
                    None => None,
                };

                self.user_repo
                    .update(
                        id,
                        first_name.trim(),
                        last_name.trim(),
                        &email_norm,
                        phone.trim(),
                        status,
                        password_hash.as_deref(),
                    )
                    .await?
                    .ok_or(AppError::UserNotFound)
            }
            None => {
                // Criação pelo painel exige senha e e-mail inédito
                let password = match password {
                    Some(password) => password,
                    None => {
                        let mut errors = validator::ValidationErrors::new();
                        let mut err = validator::ValidationError::new("required");
                        err.message = Some("A senha é obrigatória ao criar uma conta.".into());
                        errors.add("password", err);
                        return Err(AppError::ValidationError(errors));
                    }
                };

                if self.user_repo.exists_by_email(&email_norm).await? {
                    return Err(AppError::EmailAlreadyExists);
                }

                let password_hash = hash_password(password).await?;

                self.user_repo
                    .create(
                        first_name.trim(),
                        last_name.trim(),
                        &email_norm,
                        phone.trim(),
                        &password_hash,
                        status,
                        PermissaoUsuario::Usuario,
                    )
                    .await
            }
        }
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.user_repo.delete_by_id(id).await?;
        if deleted == 0 {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }

    // Lista do painel: filtrada por status ou completa, por id ascendente
    pub async fn list_users(&self, status: Option<StatusUsuario>) -> Result<Vec<User>, AppError> {
        self.user_repo.find_all(status).await
    }
}
