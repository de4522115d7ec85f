use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::{
    option_fields::PatchString,
    validation::{new_validation_error, validate_optional_url_field, validate_url},
};

// ───── Enums ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_difficulty")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(Difficulty::Beginner),
            "Intermediate" => Ok(Difficulty::Intermediate),
            "Advanced" => Ok(Difficulty::Advanced),
            _ => Err(new_validation_error(
                "invalid_difficulty",
                "Difficulty must be one of Beginner, Intermediate, Advanced",
            )),
        }
    }
}

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub technologies: Vec<String>,
    pub objectives: Vec<String>,
    pub prerequisites: Vec<String>,
    pub resources: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectInsert {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub duration: String,
    pub technologies: Vec<String>,
    pub objectives: Vec<String>,
    pub prerequisites: Vec<String>,
    pub resources: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
}

/// Validated partial update. `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub duration: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub objectives: Option<Vec<String>>,
    pub prerequisites: Option<Vec<String>>,
    pub resources: Option<Vec<String>>,
    pub github_url: Option<Option<String>>,
    pub demo_url: Option<Option<String>>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        *self == ProjectChanges::default()
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectRequest {
    #[validate(
        required(message = "Title is required"),
        custom(function = "validate_trimmed_required")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Description is required"),
        length(min = 1, message = "Description is required")
    )]
    pub description: Option<String>,

    #[validate(
        required(message = "Difficulty is required"),
        custom(function = "validate_difficulty")
    )]
    pub difficulty: Option<String>,

    #[validate(
        required(message = "Duration is required"),
        length(min = 1, message = "Duration is required")
    )]
    pub duration: Option<String>,

    pub technologies: Option<Vec<String>>,
    pub objectives: Option<Vec<String>>,
    pub prerequisites: Option<Vec<String>>,
    pub resources: Option<Vec<String>>,

    #[validate(custom(function = "validate_url"))]
    pub github_url: Option<String>,

    #[validate(custom(function = "validate_url"))]
    pub demo_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProjectRequest {
    #[validate(custom(function = "validate_trimmed_required"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_difficulty"))]
    pub difficulty: Option<String>,

    #[validate(length(min = 1, message = "Duration is required"))]
    pub duration: Option<String>,

    pub technologies: Option<Vec<String>>,
    pub objectives: Option<Vec<String>>,
    pub prerequisites: Option<Vec<String>>,
    pub resources: Option<Vec<String>>,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub github_url: PatchString,

    #[validate(custom(function = "validate_optional_url_field"))]
    pub demo_url: PatchString,
}

// ───── Validation Helpers ───────────────────────────────────────────

pub fn validate_difficulty(value: &str) -> Result<(), ValidationError> {
    Difficulty::from_str(value).map(|_| ())
}

fn validate_trimmed_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("title_blank", "Title is required"));
    }
    Ok(())
}

/// Wraps a failure that validation should already have caught.
fn missing_field(field: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, new_validation_error("required", "Field is required"));
    errors
}

// ───── Conversions ──────────────────────────────────────────────────

impl TryFrom<NewProjectRequest> for ProjectInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewProjectRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let difficulty = value
            .difficulty
            .as_deref()
            .map(Difficulty::from_str)
            .transpose()
            .map_err(|_| missing_field("difficulty"))?
            .ok_or_else(|| missing_field("difficulty"))?;

        Ok(ProjectInsert {
            title: value.title.map(|t| t.trim().to_string()).ok_or_else(|| missing_field("title"))?,
            description: value.description.ok_or_else(|| missing_field("description"))?,
            difficulty,
            duration: value.duration.ok_or_else(|| missing_field("duration"))?,
            technologies: value.technologies.unwrap_or_default(),
            objectives: value.objectives.unwrap_or_default(),
            prerequisites: value.prerequisites.unwrap_or_default(),
            resources: value.resources.unwrap_or_default(),
            github_url: value.github_url,
            demo_url: value.demo_url,
        })
    }
}

impl TryFrom<UpdateProjectRequest> for ProjectChanges {
    type Error = ValidationErrors;

    fn try_from(value: UpdateProjectRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let difficulty = value
            .difficulty
            .as_deref()
            .map(Difficulty::from_str)
            .transpose()
            .map_err(|_| missing_field("difficulty"))?;

        Ok(ProjectChanges {
            title: value.title.map(|t| t.trim().to_string()),
            description: value.description,
            difficulty,
            duration: value.duration,
            technologies: value.technologies,
            objectives: value.objectives,
            prerequisites: value.prerequisites,
            resources: value.resources,
            github_url: value.github_url.into_option(),
            demo_url: value.demo_url.into_option(),
        })
    }
}
