use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    domain::step_lifecycle::{derive_timestamps, StepDates},
    entities::validation::new_validation_error,
};

// ───── Constants ──────────────────────────────────────────────────────
pub const MIN_STEP_HOURS: f64 = 0.5;

/// Steps seeded for a project that has none yet.
pub const DEFAULT_STEPS: [(&str, StepPriority, f64); 6] = [
    ("Environment setup", StepPriority::High, 2.0),
    ("Requirements analysis", StepPriority::High, 3.0),
    ("Architecture design", StepPriority::Medium, 4.0),
    ("Core development", StepPriority::High, 8.0),
    ("Testing and debugging", StepPriority::Medium, 3.0),
    ("Documentation", StepPriority::Low, 2.0),
];

// ───── Enums ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "step_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl FromStr for StepStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(StepStatus::Todo),
            "doing" => Ok(StepStatus::Doing),
            "done" => Ok(StepStatus::Done),
            _ => Err(new_validation_error("invalid_status", "Status must be one of todo, doing, done")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "step_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum StepPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for StepPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(StepPriority::Low),
            "medium" => Ok(StepPriority::Medium),
            "high" => Ok(StepPriority::High),
            _ => Err(new_validation_error("invalid_priority", "Priority must be one of low, medium, high")),
        }
    }
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStep {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: StepStatus,
    pub priority: StepPriority,
    pub hours: f64,
    pub actual_hours: f64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub notes: String,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepInsert {
    pub project_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: StepStatus,
    pub priority: StepPriority,
    pub hours: f64,
    pub actual_hours: f64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub notes: String,
    pub order: i32,
}

/// Validated create payload, before the project and order are known.
#[derive(Debug, Clone, PartialEq)]
pub struct StepDraft {
    pub title: String,
    pub description: String,
    pub status: StepStatus,
    pub priority: StepPriority,
    pub hours: f64,
    pub actual_hours: f64,
    pub notes: String,
    /// `None` when the client left ordering to the server.
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<StepStatus>,
    pub priority: Option<StepPriority>,
    pub hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub notes: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOrder {
    pub step_id: Uuid,
    pub order: i32,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepProgress {
    pub total: usize,
    pub todo: usize,
    pub doing: usize,
    pub done: usize,
    pub total_hours: f64,
    pub done_hours: f64,
    pub actual_hours: f64,
    pub percent: f64,
}

impl StepProgress {
    pub fn from_steps(steps: &[ProjectStep]) -> Self {
        let count = |status: StepStatus| steps.iter().filter(|s| s.status == status).count();
        let done = count(StepStatus::Done);
        let total = steps.len();

        StepProgress {
            total,
            todo: count(StepStatus::Todo),
            doing: count(StepStatus::Doing),
            done,
            total_hours: steps.iter().map(|s| s.hours).sum(),
            done_hours: steps
                .iter()
                .filter(|s| s.status == StepStatus::Done)
                .map(|s| s.hours)
                .sum(),
            actual_hours: steps.iter().map(|s| s.actual_hours).sum(),
            percent: if total > 0 { done as f64 / total as f64 * 100.0 } else { 0.0 },
        }
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewStepRequest {
    #[validate(
        required(message = "Step title is required"),
        custom(function = "validate_step_title")
    )]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,

    #[validate(custom(function = "validate_priority"))]
    pub priority: Option<String>,

    #[validate(
        required(message = "Hours are required"),
        range(min = MIN_STEP_HOURS, message = "Minimum is 0.5 hours")
    )]
    pub hours: Option<f64>,

    #[validate(range(min = 0.0, message = "Actual hours cannot be negative"))]
    pub actual_hours: Option<f64>,

    pub notes: Option<String>,

    pub order: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateStepRequest {
    #[validate(custom(function = "validate_step_title"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,

    #[validate(custom(function = "validate_priority"))]
    pub priority: Option<String>,

    #[validate(range(min = MIN_STEP_HOURS, message = "Minimum is 0.5 hours"))]
    pub hours: Option<f64>,

    #[validate(range(min = 0.0, message = "Actual hours cannot be negative"))]
    pub actual_hours: Option<f64>,

    pub notes: Option<String>,

    pub order: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StepRef {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReorderStepsRequest {
    pub steps: Vec<StepRef>,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_status(value: &str) -> Result<(), ValidationError> {
    StepStatus::from_str(value).map(|_| ())
}

pub fn validate_priority(value: &str) -> Result<(), ValidationError> {
    StepPriority::from_str(value).map(|_| ())
}

fn validate_step_title(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("title_blank", "Step title is required"));
    }
    Ok(())
}

fn invalid_field(field: &'static str, err: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    errors
}

fn parse_optional<T>(field: &'static str, value: Option<&str>) -> Result<Option<T>, ValidationErrors>
where
    T: FromStr<Err = ValidationError>,
{
    value
        .map(T::from_str)
        .transpose()
        .map_err(|e| invalid_field(field, e))
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<NewStepRequest> for StepDraft {
    type Error = ValidationErrors;

    fn try_from(value: NewStepRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let status = parse_optional::<StepStatus>("status", value.status.as_deref())?;
        let priority = parse_optional::<StepPriority>("priority", value.priority.as_deref())?;

        Ok(StepDraft {
            title: value
                .title
                .map(|t| t.trim().to_string())
                .ok_or_else(|| invalid_field("title", new_validation_error("required", "Step title is required")))?,
            description: value.description.unwrap_or_default(),
            status: status.unwrap_or_default(),
            priority: priority.unwrap_or_default(),
            hours: value
                .hours
                .ok_or_else(|| invalid_field("hours", new_validation_error("required", "Hours are required")))?,
            actual_hours: value.actual_hours.unwrap_or(0.0),
            notes: value.notes.unwrap_or_default(),
            order: value.order.filter(|order| *order != 0),
        })
    }
}

impl StepDraft {
    /// Builds the row to insert, stamping lifecycle dates for the initial status.
    pub fn into_insert(self, project_id: Uuid, order: i32, now: DateTime<Utc>) -> StepInsert {
        let dates = derive_timestamps(self.status, StepDates::default(), now);

        StepInsert {
            project_id,
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            hours: self.hours,
            actual_hours: self.actual_hours,
            start_date: dates.start_date,
            end_date: dates.end_date,
            notes: self.notes,
            order,
        }
    }
}

impl TryFrom<UpdateStepRequest> for StepChanges {
    type Error = ValidationErrors;

    fn try_from(value: UpdateStepRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(StepChanges {
            title: value.title.map(|t| t.trim().to_string()),
            description: value.description,
            status: parse_optional::<StepStatus>("status", value.status.as_deref())?,
            priority: parse_optional::<StepPriority>("priority", value.priority.as_deref())?,
            hours: value.hours,
            actual_hours: value.actual_hours,
            notes: value.notes,
            order: value.order,
        })
    }
}

impl ProjectStep {
    pub fn dates(&self) -> StepDates {
        StepDates { start_date: self.start_date, end_date: self.end_date }
    }

    /// Applies a validated partial update and re-derives lifecycle dates.
    pub fn apply_changes(&mut self, changes: StepChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(hours) = changes.hours {
            self.hours = hours;
        }
        if let Some(actual_hours) = changes.actual_hours {
            self.actual_hours = actual_hours;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes;
        }
        if let Some(order) = changes.order {
            self.order = order;
        }

        let dates = derive_timestamps(self.status, self.dates(), now);
        self.start_date = dates.start_date;
        self.end_date = dates.end_date;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    pub(crate) fn sample_step(status: StepStatus, hours: f64) -> ProjectStep {
        let now = Utc::now();
        ProjectStep {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            title: "Write parser".into(),
            description: String::new(),
            status,
            priority: StepPriority::Medium,
            hours,
            actual_hours: 0.0,
            start_date: None,
            end_date: None,
            notes: String::new(),
            order: 1,
            created_at: now,
            updated_at: now,
        }
    }

    fn request_with_hours(hours: f64) -> NewStepRequest {
        NewStepRequest {
            title: Some("Set up CI".into()),
            hours: Some(hours),
            ..Default::default()
        }
    }

    #[test]
    fn hours_below_minimum_are_rejected() {
        let err = AppError::from(StepDraft::try_from(request_with_hours(0.25)).unwrap_err());
        let AppError::ValidationError(fields) = err else { panic!("expected validation error") };
        assert_eq!(fields[0].field, "hours");
    }

    #[test]
    fn minimum_hours_are_accepted_with_defaults() {
        let draft = StepDraft::try_from(request_with_hours(0.5)).unwrap();

        assert_eq!(draft.hours, 0.5);
        assert_eq!(draft.status, StepStatus::Todo);
        assert_eq!(draft.priority, StepPriority::Medium);
        assert_eq!(draft.actual_hours, 0.0);
        assert_eq!(draft.order, None);
    }

    #[test]
    fn zero_order_means_server_assigned() {
        let request = NewStepRequest { order: Some(0), ..request_with_hours(1.0) };
        assert_eq!(StepDraft::try_from(request).unwrap().order, None);

        let request = NewStepRequest { order: Some(7), ..request_with_hours(1.0) };
        assert_eq!(StepDraft::try_from(request).unwrap().order, Some(7));
    }

    #[test]
    fn unknown_status_and_missing_title_are_listed() {
        let request = NewStepRequest {
            status: Some("blocked".into()),
            hours: Some(1.0),
            ..Default::default()
        };

        let err = AppError::from(StepDraft::try_from(request).unwrap_err());
        let AppError::ValidationError(fields) = err else { panic!("expected validation error") };
        let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, vec!["status", "title"]);
    }

    #[test]
    fn creating_a_step_in_progress_stamps_start_date() {
        let request = NewStepRequest { status: Some("doing".into()), ..request_with_hours(2.0) };
        let now = Utc::now();

        let insert = StepDraft::try_from(request).unwrap().into_insert(Uuid::new_v4(), 3, now);

        assert_eq!(insert.start_date, Some(now));
        assert_eq!(insert.end_date, None);
        assert_eq!(insert.order, 3);
    }

    #[test]
    fn apply_changes_stamps_dates_on_transition() {
        let mut step = sample_step(StepStatus::Todo, 2.0);
        let first = Utc::now();

        step.apply_changes(StepChanges { status: Some(StepStatus::Doing), ..Default::default() }, first);
        assert_eq!(step.start_date, Some(first));

        let second = first + chrono::Duration::hours(1);
        step.apply_changes(StepChanges { status: Some(StepStatus::Done), actual_hours: Some(2.5), ..Default::default() }, second);
        assert_eq!(step.end_date, Some(second));
        assert_eq!(step.actual_hours, 2.5);

        let third = second + chrono::Duration::hours(1);
        step.apply_changes(StepChanges { status: Some(StepStatus::Doing), ..Default::default() }, third);
        assert_eq!(step.start_date, Some(first));
        assert_eq!(step.end_date, Some(second));
    }

    #[test]
    fn update_request_rejects_negative_actual_hours() {
        let request: UpdateStepRequest = serde_json::from_str(r#"{"actualHours": -1}"#).unwrap();
        assert!(StepChanges::try_from(request).is_err());
    }

    #[test]
    fn progress_counts_statuses_and_hours() {
        let steps = vec![
            sample_step(StepStatus::Done, 2.0),
            sample_step(StepStatus::Doing, 3.0),
            sample_step(StepStatus::Todo, 1.0),
            sample_step(StepStatus::Done, 4.0),
        ];

        let progress = StepProgress::from_steps(&steps);

        assert_eq!(progress.total, 4);
        assert_eq!(progress.done, 2);
        assert_eq!(progress.doing, 1);
        assert_eq!(progress.todo, 1);
        assert_eq!(progress.total_hours, 10.0);
        assert_eq!(progress.done_hours, 6.0);
        assert_eq!(progress.percent, 50.0);
    }

    #[test]
    fn progress_of_empty_project_is_zero() {
        assert_eq!(StepProgress::from_steps(&[]).percent, 0.0);
    }

    #[test]
    fn reorder_payload_accepts_document_ids() {
        let id = Uuid::new_v4();
        let body = format!(r#"{{"steps": [{{"_id": "{id}", "title": "ignored"}}, {{"id": "{id}"}}]}}"#);

        let request: ReorderStepsRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(request.steps.len(), 2);
        assert!(request.steps.iter().all(|s| s.id == id));
    }
}
