use std::sync::Arc;

use crate::{
    entities::project::{NewProjectRequest, Project, ProjectChanges, ProjectInsert, UpdateProjectRequest},
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct ProjectHandler {
    pub project_repo: Arc<dyn ProjectRepository>,
}

fn project_not_found() -> AppError {
    AppError::NotFound("Project not found".to_string())
}

impl ProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        ProjectHandler { project_repo }
    }

    /// All projects, newest first.
    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects().await
    }

    pub async fn get_project(&self, project_id: &str) -> Result<Project, AppError> {
        let id = valid_uuid(project_id)?;

        self.project_repo
            .get_project(id)
            .await?
            .ok_or_else(project_not_found)
    }

    pub async fn create_project(&self, project: NewProjectRequest) -> Result<Project, AppError> {
        let insert = ProjectInsert::try_from(project)?;
        let created = self.project_repo.create_project(insert).await?;

        tracing::info!(project_id = %created.id, "Project created");
        Ok(created)
    }

    pub async fn update_project(
        &self,
        project_id: &str,
        project: UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        let id = valid_uuid(project_id)?;
        let changes = ProjectChanges::try_from(project)?;

        self.project_repo
            .update_project(id, changes)
            .await?
            .ok_or_else(project_not_found)
    }

    /// Deletes the project together with its steps.
    pub async fn delete_project(&self, project_id: &str) -> Result<(), AppError> {
        let id = valid_uuid(project_id)?;

        if !self.project_repo.delete_project(id).await? {
            return Err(project_not_found());
        }

        tracing::info!(project_id = %id, "Project deleted");
        Ok(())
    }
}
