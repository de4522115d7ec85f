use async_trait::async_trait;
use mockall::automock;
use sqlx::{types::Json, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::quiz::{Quiz, QuizChanges, QuizInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxQuizRepo,
};

#[automock]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError>;
    async fn get_quiz(&self, id: Uuid) -> Result<Option<Quiz>, AppError>;
    async fn create_quiz(&self, quiz: QuizInsert) -> Result<Quiz, AppError>;
    async fn update_quiz(&self, id: Uuid, changes: QuizChanges) -> Result<Option<Quiz>, AppError>;
}

impl SqlxQuizRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxQuizRepo { pool }
    }
}

#[async_trait]
impl QuizRepository for SqlxQuizRepo {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, AppError> {
        let quizzes = sqlx::query_as::<_, Quiz>("SELECT * FROM quizzes ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(quizzes)
    }

    async fn get_quiz(&self, id: Uuid) -> Result<Option<Quiz>, AppError> {
        sqlx::query_as::<_, Quiz>("SELECT * FROM quizzes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn create_quiz(&self, quiz: QuizInsert) -> Result<Quiz, AppError> {
        let created = sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (
                title, description, questions, time_limit, passing_score, category, difficulty
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#
        )
        .bind(quiz.title)
        .bind(quiz.description)
        .bind(Json(quiz.questions))
        .bind(quiz.time_limit)
        .bind(quiz.passing_score)
        .bind(quiz.category)
        .bind(quiz.difficulty)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_quiz(&self, id: Uuid, changes: QuizChanges) -> Result<Option<Quiz>, AppError> {
        if changes == QuizChanges::default() {
            return self.get_quiz(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE quizzes SET ");
        let mut set = builder.separated(", ");

        if let Some(title) = changes.title {
            set.push("title = ").push_bind_unseparated(title);
        }
        if let Some(description) = changes.description {
            set.push("description = ").push_bind_unseparated(description);
        }
        if let Some(questions) = changes.questions {
            set.push("questions = ").push_bind_unseparated(Json(questions));
        }
        if let Some(time_limit) = changes.time_limit {
            set.push("time_limit = ").push_bind_unseparated(time_limit);
        }
        if let Some(passing_score) = changes.passing_score {
            set.push("passing_score = ").push_bind_unseparated(passing_score);
        }
        if let Some(category) = changes.category {
            set.push("category = ").push_bind_unseparated(category);
        }
        if let Some(difficulty) = changes.difficulty {
            set.push("difficulty = ").push_bind_unseparated(difficulty);
        }
        if let Some(completed) = changes.completed {
            set.push("completed = ").push_bind_unseparated(completed);
        }
        if let Some(score) = changes.score {
            set.push("score = ").push_bind_unseparated(score);
        }
        set.push("updated_at = NOW()");

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING *");

        let updated = builder
            .build_query_as::<Quiz>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }
}
