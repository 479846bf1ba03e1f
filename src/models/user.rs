// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Status da conta. Apenas ATIVO passa na autenticação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "status_usuario", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum StatusUsuario {
    Ativo,
    Desativado,
    Bloqueado,
    Inativo,
}

impl StatusUsuario {
    /// Parser tolerante usado no filtro de usuários do painel.
    /// Token vazio ou irreconhecível vira "sem filtro", nunca um erro.
    pub fn parse_filter(token: &str) -> Option<Self> {
        match token.trim().to_uppercase().as_str() {
            "ATIVO" => Some(Self::Ativo),
            "DESATIVADO" => Some(Self::Desativado),
            "BLOQUEADO" => Some(Self::Bloqueado),
            "INATIVO" => Some(Self::Inativo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ativo => "ATIVO",
            Self::Desativado => "DESATIVADO",
            Self::Bloqueado => "BLOQUEADO",
            Self::Inativo => "INATIVO",
        }
    }
}

// Permissão da conta (ADMIN, USUARIO)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "permissao_usuario", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum PermissaoUsuario {
    Admin,
    Usuario,
}

impl PermissaoUsuario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Usuario => "USUARIO",
        }
    }
}

/// E-mails são comparados e armazenados sempre normalizados.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    // Registros antigos podem vir sem status/permissão; o resolver trata
    pub status_usuario: Option<StatusUsuario>,
    pub permissao: Option<PermissaoUsuario>,

    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Permissão efetiva da conta: registro sem permissão conta como USUARIO
    /// (evita quebrar em base antiga). É a única fonte da verdade para o
    /// papel do usuário; quem nega ou libera acesso é a camada de cima.
    pub fn permissao_efetiva(&self) -> PermissaoUsuario {
        self.permissao.unwrap_or(PermissaoUsuario::Usuario)
    }

    /// Token de papel usado no controle de acesso ("ROLE_ADMIN", "ROLE_USUARIO").
    pub fn authority(&self) -> String {
        format!("ROLE_{}", self.permissao_efetiva().as_str())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn validate_not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("not_blank");
        err.message = Some("O campo não pode ficar em branco.".into());
        return Err(err);
    }
    Ok(())
}

// Dados para cadastro de um novo usuário (signup)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(custom(function = "validate_not_blank"), length(max = 60, message = "O nome deve ter no máximo 60 caracteres."))]
    pub first_name: String,

    #[validate(custom(function = "validate_not_blank"), length(max = 60, message = "O sobrenome deve ter no máximo 60 caracteres."))]
    pub last_name: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(custom(function = "validate_not_blank"), length(max = 20, message = "O telefone deve ter no máximo 20 caracteres."))]
    pub phone: String,

    #[validate(length(min = 8, max = 72, message = "A senha deve ter entre 8 e 72 caracteres."))]
    pub password: String,

    #[validate(length(min = 8, max = 72, message = "A confirmação deve ter entre 8 e 72 caracteres."))]
    pub confirm_password: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,

    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usuario(permissao: Option<PermissaoUsuario>) -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Ana".into(),
            last_name: "Souza".into(),
            email: "ana@example.com".into(),
            phone: "11999990000".into(),
            password_hash: "$2b$12$hash".into(),
            status_usuario: Some(StatusUsuario::Ativo),
            permissao,
            profile_image_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn permissao_ausente_resolve_para_usuario() {
        assert_eq!(usuario(None).permissao_efetiva(), PermissaoUsuario::Usuario);
        assert_eq!(usuario(Some(PermissaoUsuario::Admin)).permissao_efetiva(), PermissaoUsuario::Admin);
    }

    #[test]
    fn authority_usa_o_prefixo_de_papel() {
        assert_eq!(usuario(Some(PermissaoUsuario::Admin)).authority(), "ROLE_ADMIN");
        assert_eq!(usuario(None).authority(), "ROLE_USUARIO");
    }

    #[test]
    fn filtro_de_status_e_total() {
        assert_eq!(StatusUsuario::parse_filter("ativo"), Some(StatusUsuario::Ativo));
        assert_eq!(StatusUsuario::parse_filter("ATIVO"), Some(StatusUsuario::Ativo));
        assert_eq!(StatusUsuario::parse_filter(" bloqueado "), Some(StatusUsuario::Bloqueado));
        assert_eq!(StatusUsuario::parse_filter("xyz"), None);
        assert_eq!(StatusUsuario::parse_filter(""), None);
    }

    #[test]
    fn emails_diferindo_por_caixa_e_espacos_normalizam_igual() {
        assert_eq!(normalize_email("  Ana@Example.COM "), normalize_email("ana@example.com"));
    }
}
