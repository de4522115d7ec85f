use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::step::{ProjectStep, StepInsert, StepOrder},
    errors::AppError,
    repositories::sqlx_repo::SqlxStepRepo,
};

const INSERT_STEP: &str = r#"
    INSERT INTO project_steps (
        project_id, title, description, status, priority, hours,
        actual_hours, start_date, end_date, notes, sort_order
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
    RETURNING *
"#;

#[automock]
#[async_trait]
pub trait StepRepository: Send + Sync {
    /// Steps of a project by `order`, ties broken by creation time.
    async fn list_steps(&self, project_id: Uuid) -> Result<Vec<ProjectStep>, AppError>;
    async fn count_steps(&self, project_id: Uuid) -> Result<i64, AppError>;
    async fn max_step_order(&self, project_id: Uuid) -> Result<Option<i32>, AppError>;
    async fn get_step(&self, project_id: Uuid, step_id: Uuid) -> Result<Option<ProjectStep>, AppError>;
    async fn create_step(&self, step: StepInsert) -> Result<ProjectStep, AppError>;
    /// Inserts every step or none of them.
    async fn create_steps(&self, steps: Vec<StepInsert>) -> Result<Vec<ProjectStep>, AppError>;
    /// Writes the full row. `None` when the step is no longer in its project.
    async fn update_step(&self, step: ProjectStep) -> Result<Option<ProjectStep>, AppError>;
    async fn delete_step(&self, project_id: Uuid, step_id: Uuid) -> Result<bool, AppError>;
    /// Rewrites `order` for each listed step in one transaction. Fails with
    /// `NotFound` and changes nothing if any step is outside the project.
    async fn apply_step_orders(&self, project_id: Uuid, orders: Vec<StepOrder>) -> Result<Vec<ProjectStep>, AppError>;
}

impl SqlxStepRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxStepRepo { pool }
    }
}

fn bind_insert<'q>(
    step: StepInsert,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, ProjectStep, sqlx::postgres::PgArguments> {
    sqlx::query_as::<_, ProjectStep>(INSERT_STEP)
        .bind(step.project_id)
        .bind(step.title)
        .bind(step.description)
        .bind(step.status)
        .bind(step.priority)
        .bind(step.hours)
        .bind(step.actual_hours)
        .bind(step.start_date)
        .bind(step.end_date)
        .bind(step.notes)
        .bind(step.order)
}

#[async_trait]
impl StepRepository for SqlxStepRepo {
    async fn list_steps(&self, project_id: Uuid) -> Result<Vec<ProjectStep>, AppError> {
        let steps = sqlx::query_as::<_, ProjectStep>(
            r#"
            SELECT * FROM project_steps
            WHERE project_id = $1
            ORDER BY sort_order ASC, created_at ASC
            "#
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(steps)
    }

    async fn count_steps(&self, project_id: Uuid) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM project_steps WHERE project_id = $1"
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn max_step_order(&self, project_id: Uuid) -> Result<Option<i32>, AppError> {
        let max: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(sort_order) FROM project_steps WHERE project_id = $1"
        )
        .bind(project_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(max)
    }

    async fn get_step(&self, project_id: Uuid, step_id: Uuid) -> Result<Option<ProjectStep>, AppError> {
        sqlx::query_as::<_, ProjectStep>(
            "SELECT * FROM project_steps WHERE id = $1 AND project_id = $2"
        )
        .bind(step_id)
        .bind(project_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)
    }

    async fn create_step(&self, step: StepInsert) -> Result<ProjectStep, AppError> {
        let created = bind_insert(step).fetch_one(&self.pool).await?;
        Ok(created)
    }

    async fn create_steps(&self, steps: Vec<StepInsert>) -> Result<Vec<ProjectStep>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(steps.len());

        for step in steps {
            created.push(bind_insert(step).fetch_one(&mut *tx).await?);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn update_step(&self, step: ProjectStep) -> Result<Option<ProjectStep>, AppError> {
        let updated = sqlx::query_as::<_, ProjectStep>(
            r#"
            UPDATE project_steps SET
                title = $1,
                description = $2,
                status = $3,
                priority = $4,
                hours = $5,
                actual_hours = $6,
                start_date = $7,
                end_date = $8,
                notes = $9,
                sort_order = $10,
                updated_at = NOW()
            WHERE id = $11 AND project_id = $12
            RETURNING *
            "#
        )
        .bind(step.title)
        .bind(step.description)
        .bind(step.status)
        .bind(step.priority)
        .bind(step.hours)
        .bind(step.actual_hours)
        .bind(step.start_date)
        .bind(step.end_date)
        .bind(step.notes)
        .bind(step.order)
        .bind(step.id)
        .bind(step.project_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_step(&self, project_id: Uuid, step_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM project_steps WHERE id = $1 AND project_id = $2")
            .bind(step_id)
            .bind(project_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn apply_step_orders(&self, project_id: Uuid, orders: Vec<StepOrder>) -> Result<Vec<ProjectStep>, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut updated = Vec::with_capacity(orders.len());

        for StepOrder { step_id, order } in orders {
            let step = sqlx::query_as::<_, ProjectStep>(
                r#"
                UPDATE project_steps
                SET sort_order = $1, updated_at = NOW()
                WHERE id = $2 AND project_id = $3
                RETURNING *
                "#
            )
            .bind(order)
            .bind(step_id)
            .bind(project_id)
            .fetch_optional(&mut *tx)
            .await?;

            match step {
                Some(step) => updated.push(step),
                // Dropping the transaction rolls back earlier rewrites
                None => return Err(AppError::NotFound(format!("Step {} not found", step_id))),
            }
        }

        tx.commit().await?;
        Ok(updated)
    }
}
