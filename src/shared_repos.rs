use std::sync::Arc;

use crate::repositories::{
    project::ProjectRepository,
    quiz::QuizRepository,
    sqlx_repo::{SqlxProjectRepo, SqlxQuizRepo, SqlxStepRepo, SqlxUserRepo},
    step::StepRepository,
    user::UserRepository,
};

#[derive(Clone)]
pub struct SharedRepositories {
    pub project_repo: Arc<dyn ProjectRepository>,
    pub step_repo: Arc<dyn StepRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub quiz_repo: Arc<dyn QuizRepository>,
}

impl SharedRepositories {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SharedRepositories {
            project_repo: Arc::new(SqlxProjectRepo::new(pool.clone())),
            step_repo: Arc::new(SqlxStepRepo::new(pool.clone())),
            user_repo: Arc::new(SqlxUserRepo::new(pool.clone())),
            quiz_repo: Arc::new(SqlxQuizRepo::new(pool)),
        }
    }
}
