// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::user::{normalize_email, Claims, PermissaoUsuario, StatusUsuario, User},
};

/// Gera o hash bcrypt fora do runtime assíncrono.
/// Usado tanto no cadastro público quanto no save de usuário do painel.
pub(crate) async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { user_repo, jwt_secret }
    }

    pub async fn register_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        password: &str,
    ) -> Result<String, AppError> {
        // 1. Normaliza o e-mail antes de qualquer comparação
        let email_norm = normalize_email(email);

        // 2. Unicidade é verificada no momento da escrita
        if self.user_repo.exists_by_email(&email_norm).await? {
            return Err(AppError::EmailAlreadyExists);
        }

        // 3. Hashing (nunca guardamos a senha em texto puro)
        let hashed_password = hash_password(password).await?;

        // 4. Conta nova entra ATIVO com permissão USUARIO
        let new_user = self
            .user_repo
            .create(
                first_name.trim(),
                last_name.trim(),
                &email_norm,
                phone.trim(),
                &hashed_password,
                StatusUsuario::Ativo,
                PermissaoUsuario::Usuario,
            )
            .await?;

        tracing::info!("🔐 Conta criada para {}", new_user.email);

        // 5. Gera o token (isso não precisa de banco)
        self.create_token(new_user.id)
    }

    // Qualquer falha aqui (e-mail desconhecido, conta fora de ATIVO, senha
    // errada) responde com o mesmo erro genérico, sem revelar qual foi.
    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if user.status_usuario != Some(StatusUsuario::Ativo) {
            return Err(AppError::InvalidCredentials);
        }

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!("👤 Login de {} ({})", user.full_name(), user.email);

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
