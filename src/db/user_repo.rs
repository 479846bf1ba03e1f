// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::user::{PermissaoUsuario, StatusUsuario, User},
};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail (já normalizado pelo chamador)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    // Lista para o painel: filtrada por status ou completa, sempre por id ascendente
    pub async fn find_all(&self, status: Option<StatusUsuario>) -> Result<Vec<User>, AppError> {
        let users = match status {
            Some(status) => {
                sqlx::query_as::<_, User>(
                    "SELECT * FROM users WHERE status_usuario = $1 ORDER BY id ASC",
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id ASC")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(users)
    }

    // Cria um novo usuário no banco de dados
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        password_hash: &str,
        status: StatusUsuario,
        permissao: PermissaoUsuario,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, email, phone, password_hash, status_usuario, permissao)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone)
        .bind(password_hash)
        .bind(status)
        .bind(permissao)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Converte violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    // Atualiza os dados cadastrais; a senha só muda quando um novo hash é passado
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: &str,
        status: StatusUsuario,
        password_hash: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let updated = match password_hash {
            Some(hash) => {
                sqlx::query_as::<_, User>(
                    r#"
                    UPDATE users
                    SET first_name = $2, last_name = $3, email = $4, phone = $5,
                        status_usuario = $6, password_hash = $7
                    WHERE id = $1
                    RETURNING *
                    "#,
                )
                .bind(id)
                .bind(first_name)
                .bind(last_name)
                .bind(email)
                .bind(phone)
                .bind(status)
                .bind(hash)
                .fetch_optional(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, User>(
                    r#"
                    UPDATE users
                    SET first_name = $2, last_name = $3, email = $4, phone = $5,
                        status_usuario = $6
                    WHERE id = $1
                    RETURNING *
                    "#,
                )
                .bind(id)
                .bind(first_name)
                .bind(last_name)
                .bind(email)
                .bind(phone)
                .bind(status)
                .fetch_optional(&self.pool)
                .await
            }
        };

        updated.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
