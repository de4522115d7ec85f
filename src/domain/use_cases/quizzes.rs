use std::sync::Arc;

use uuid::Uuid;

use crate::{
    entities::{
        quiz::{NewQuizRequest, Quiz, QuizChanges, QuizInsert, QuizResult, SubmitQuizRequest, UpdateQuizRequest},
        quiz_session::QuizSession,
    },
    errors::AppError,
    repositories::quiz::QuizRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct QuizHandler {
    pub quiz_repo: Arc<dyn QuizRepository>,
}

fn quiz_not_found() -> AppError {
    AppError::NotFound("Quiz not found".to_string())
}

impl QuizHandler {
    pub fn new(quiz_repo: Arc<dyn QuizRepository>) -> Self {
        QuizHandler { quiz_repo }
    }

    pub async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError> {
        self.quiz_repo.list_quizzes().await
    }

    pub async fn get_quiz(&self, quiz_id: &str) -> Result<Quiz, AppError> {
        let id = valid_uuid(quiz_id)?;
        self.fetch(id).await
    }

    async fn fetch(&self, id: Uuid) -> Result<Quiz, AppError> {
        self.quiz_repo.get_quiz(id).await?.ok_or_else(quiz_not_found)
    }

    pub async fn create_quiz(&self, quiz: NewQuizRequest) -> Result<Quiz, AppError> {
        let insert = QuizInsert::try_from(quiz)?;
        self.quiz_repo.create_quiz(insert).await
    }

    pub async fn update_quiz(&self, quiz_id: &str, quiz: UpdateQuizRequest) -> Result<Quiz, AppError> {
        let id = valid_uuid(quiz_id)?;
        let changes = QuizChanges::try_from(quiz)?;

        self.quiz_repo
            .update_quiz(id, changes)
            .await?
            .ok_or_else(quiz_not_found)
    }

    /// Replays `answers` through a quiz session, then stores the outcome on
    /// the quiz. Missing trailing answers count as skipped questions.
    pub async fn submit_answers(
        &self,
        quiz_id: &str,
        submission: SubmitQuizRequest,
    ) -> Result<QuizResult, AppError> {
        let id = valid_uuid(quiz_id)?;
        let quiz = self.fetch(id).await?;

        let total = quiz.questions().len();
        if submission.answers.len() > total {
            return Err(AppError::InvalidInput(format!(
                "Expected at most {} answers, got {}",
                total,
                submission.answers.len()
            )));
        }

        let result = replay(&quiz, &submission.answers)?;

        let changes = QuizChanges {
            completed: Some(true),
            score: Some(result.score),
            ..Default::default()
        };
        self.quiz_repo
            .update_quiz(id, changes)
            .await?
            .ok_or_else(quiz_not_found)?;

        tracing::info!(quiz_id = %id, score = result.score, passed = result.passed, "Quiz submitted");
        Ok(result)
    }
}

fn replay(quiz: &Quiz, answers: &[Option<usize>]) -> Result<QuizResult, AppError> {
    let mut session = QuizSession::new();
    session.start(quiz)?;

    for index in 0..quiz.questions().len() {
        if let Some(Some(option)) = answers.get(index) {
            session.select(*option)?;
        }
        if let Some(result) = session.next()? {
            return Ok(result);
        }
    }

    Err(AppError::InternalError("Quiz session ended without a result".to_string()))
}
