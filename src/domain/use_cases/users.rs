use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::user::{NewUser, User},
    errors::AppError,
    repositories::user::UserRepository,
};

pub struct UserHandler {
    pub user_repo: Arc<dyn UserRepository>,
}

impl UserHandler {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        UserHandler { user_repo }
    }

    pub async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let user = NewUser { email: user.normalized_email() };
        user.validate()?;

        self.user_repo.create_user(user.email).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<User, AppError> {
        self.user_repo
            .get_user_by_email(email.trim().to_string())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
