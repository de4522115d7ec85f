use async_trait::async_trait;
use mockall::automock;
use std::borrow::Cow;

use crate::{
    entities::user::User,
    errors::AppError,
    repositories::sqlx_repo::SqlxUserRepo,
};

#[automock]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;
    async fn create_user(&self, email: String) -> Result<User, AppError>;
    async fn get_user_by_email(&self, email: String) -> Result<Option<User>, AppError>;
    /// `None` when no user has this email.
    async fn set_cv_url(&self, email: String, cv_url: String) -> Result<Option<User>, AppError>;
}

impl SqlxUserRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxUserRepo { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn create_user(&self, email: String) -> Result<User, AppError> {
        sqlx::query_as::<_, User>("INSERT INTO users (email) VALUES ($1) RETURNING *")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                    AppError::Conflict("User with this email already exists".to_string())
                }
                _ => AppError::from(e),
            })
    }

    async fn get_user_by_email(&self, email: String) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(user)
    }

    async fn set_cv_url(&self, email: String, cv_url: String) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET cv_url = $1, updated_at = NOW()
            WHERE email = $2
            RETURNING *
            "#
        )
        .bind(cv_url)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
