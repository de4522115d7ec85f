mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, step_lifecycle, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, utils};

use shared_repos::SharedRepositories;
use use_cases::{
    projects::ProjectHandler,
    quizzes::QuizHandler,
    steps::StepHandler,
    upload::UploadHandler,
    users::UserHandler,
};

pub struct AppState {
    pub project_handler: ProjectHandler,
    pub step_handler: StepHandler,
    pub upload_handler: UploadHandler,
    pub quiz_handler: QuizHandler,
    pub user_handler: UserHandler,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, repos: SharedRepositories) -> Self {
        AppState {
            project_handler: ProjectHandler::new(repos.project_repo.clone()),
            step_handler: StepHandler::new(repos.project_repo, repos.step_repo),
            upload_handler: UploadHandler::new(repos.user_repo.clone(), config),
            quiz_handler: QuizHandler::new(repos.quiz_repo),
            user_handler: UserHandler::new(repos.user_repo),
        }
    }
}
