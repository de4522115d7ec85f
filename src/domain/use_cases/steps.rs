use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    domain::step_lifecycle::{assign_positions, next_step_order},
    entities::step::{
        NewStepRequest, ProjectStep, ReorderStepsRequest, StepChanges, StepDraft, StepProgress,
        StepStatus, UpdateStepRequest, DEFAULT_STEPS,
    },
    errors::AppError,
    repositories::{project::ProjectRepository, step::StepRepository},
    utils::valid_uuid::valid_uuid,
};

pub struct StepHandler {
    pub project_repo: Arc<dyn ProjectRepository>,
    pub step_repo: Arc<dyn StepRepository>,
}

fn step_not_found() -> AppError {
    AppError::NotFound("Step not found".to_string())
}

impl StepHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>, step_repo: Arc<dyn StepRepository>) -> Self {
        StepHandler { project_repo, step_repo }
    }

    /// Parses the project id and checks the project exists.
    async fn existing_project(&self, project_id: &str) -> Result<Uuid, AppError> {
        let id = valid_uuid(project_id)?;

        if !self.project_repo.project_exists(id).await? {
            return Err(AppError::NotFound("Project not found".to_string()));
        }
        Ok(id)
    }

    pub async fn list_steps(&self, project_id: &str) -> Result<Vec<ProjectStep>, AppError> {
        let project_id = self.existing_project(project_id).await?;
        self.step_repo.list_steps(project_id).await
    }

    /// Creates a step. Without an explicit order it is appended after the
    /// project's current last step.
    pub async fn create_step(&self, project_id: &str, step: NewStepRequest) -> Result<ProjectStep, AppError> {
        let project_id = self.existing_project(project_id).await?;
        let draft = StepDraft::try_from(step)?;

        let order = match draft.order {
            Some(order) => order,
            None => next_step_order(self.step_repo.max_step_order(project_id).await?),
        };

        let insert = draft.into_insert(project_id, order, Utc::now());
        self.step_repo.create_step(insert).await
    }

    pub async fn get_step(&self, project_id: &str, step_id: &str) -> Result<ProjectStep, AppError> {
        let project_id = valid_uuid(project_id)?;
        let step_id = valid_uuid(step_id)?;

        self.step_repo
            .get_step(project_id, step_id)
            .await?
            .ok_or_else(step_not_found)
    }

    pub async fn update_step(
        &self,
        project_id: &str,
        step_id: &str,
        step: UpdateStepRequest,
    ) -> Result<ProjectStep, AppError> {
        let project_id = valid_uuid(project_id)?;
        let step_id = valid_uuid(step_id)?;
        let changes = StepChanges::try_from(step)?;

        let mut current = self
            .step_repo
            .get_step(project_id, step_id)
            .await?
            .ok_or_else(step_not_found)?;

        current.apply_changes(changes, Utc::now());

        self.step_repo
            .update_step(current)
            .await?
            .ok_or_else(step_not_found)
    }

    pub async fn delete_step(&self, project_id: &str, step_id: &str) -> Result<(), AppError> {
        let project_id = valid_uuid(project_id)?;
        let step_id = valid_uuid(step_id)?;

        if !self.step_repo.delete_step(project_id, step_id).await? {
            return Err(step_not_found());
        }
        Ok(())
    }

    /// Gives each listed step its 1-based position in the request. All steps
    /// must belong to the project or nothing is changed.
    pub async fn reorder_steps(
        &self,
        project_id: &str,
        request: ReorderStepsRequest,
    ) -> Result<Vec<ProjectStep>, AppError> {
        let project_id = self.existing_project(project_id).await?;

        let ids: Vec<Uuid> = request.steps.iter().map(|s| s.id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let steps = self
            .step_repo
            .apply_step_orders(project_id, assign_positions(&ids))
            .await?;

        tracing::info!(project_id = %project_id, count = steps.len(), "Steps reordered");
        Ok(steps)
    }

    pub async fn progress(&self, project_id: &str) -> Result<StepProgress, AppError> {
        let project_id = self.existing_project(project_id).await?;
        let steps = self.step_repo.list_steps(project_id).await?;

        Ok(StepProgress::from_steps(&steps))
    }

    /// Seeds the default plan into a project that has no steps yet.
    pub async fn seed_default_steps(&self, project_id: &str) -> Result<Vec<ProjectStep>, AppError> {
        let project_id = self.existing_project(project_id).await?;

        if self.step_repo.count_steps(project_id).await? > 0 {
            return Err(AppError::Conflict("Project already has steps".to_string()));
        }

        let now = Utc::now();
        let inserts = DEFAULT_STEPS
            .iter()
            .zip(1..)
            .map(|((title, priority, hours), order)| {
                StepDraft {
                    title: title.to_string(),
                    description: String::new(),
                    status: StepStatus::Todo,
                    priority: *priority,
                    hours: *hours,
                    actual_hours: 0.0,
                    notes: String::new(),
                    order: Some(order),
                }
                .into_insert(project_id, order, now)
            })
            .collect();

        self.step_repo.create_steps(inserts).await
    }
}
