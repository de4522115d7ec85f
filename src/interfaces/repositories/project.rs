use async_trait::async_trait;
use mockall::automock;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::project::{Project, ProjectChanges, ProjectInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

#[automock]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, AppError>;
    async fn project_exists(&self, id: Uuid) -> Result<bool, AppError>;
    async fn create_project(&self, project: ProjectInsert) -> Result<Project, AppError>;
    async fn update_project(&self, id: Uuid, changes: ProjectChanges) -> Result<Option<Project>, AppError>;
    /// Removes the project and, through the foreign key, its steps.
    async fn delete_project(&self, id: Uuid) -> Result<bool, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_project(&self, id: Uuid) -> Result<Option<Project>, AppError> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn project_exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM projects WHERE id = $1)"
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create_project(&self, project: ProjectInsert) -> Result<Project, AppError> {
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                title, description, difficulty, duration, technologies,
                objectives, prerequisites, resources, github_url, demo_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#
        )
        .bind(project.title)
        .bind(project.description)
        .bind(project.difficulty)
        .bind(project.duration)
        .bind(project.technologies)
        .bind(project.objectives)
        .bind(project.prerequisites)
        .bind(project.resources)
        .bind(project.github_url)
        .bind(project.demo_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_project(&self, id: Uuid, changes: ProjectChanges) -> Result<Option<Project>, AppError> {
        if changes.is_empty() {
            return self.get_project(id).await;
        }

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE projects SET ");
        let mut set = builder.separated(", ");

        if let Some(title) = changes.title {
            set.push("title = ").push_bind_unseparated(title);
        }
        if let Some(description) = changes.description {
            set.push("description = ").push_bind_unseparated(description);
        }
        if let Some(difficulty) = changes.difficulty {
            set.push("difficulty = ").push_bind_unseparated(difficulty);
        }
        if let Some(duration) = changes.duration {
            set.push("duration = ").push_bind_unseparated(duration);
        }
        if let Some(technologies) = changes.technologies {
            set.push("technologies = ").push_bind_unseparated(technologies);
        }
        if let Some(objectives) = changes.objectives {
            set.push("objectives = ").push_bind_unseparated(objectives);
        }
        if let Some(prerequisites) = changes.prerequisites {
            set.push("prerequisites = ").push_bind_unseparated(prerequisites);
        }
        if let Some(resources) = changes.resources {
            set.push("resources = ").push_bind_unseparated(resources);
        }
        // Some(None) clears the column
        if let Some(github_url) = changes.github_url {
            set.push("github_url = ").push_bind_unseparated(github_url);
        }
        if let Some(demo_url) = changes.demo_url {
            set.push("demo_url = ").push_bind_unseparated(demo_url);
        }
        set.push("updated_at = NOW()");

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING *");

        let updated = builder
            .build_query_as::<Project>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
