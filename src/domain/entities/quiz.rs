use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::validation::{new_validation_error, validate_not_blank};

const MIN_OPTIONS: u64 = 2;
const MAX_SCORE: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "quiz_difficulty", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuizDifficulty {
    Facile,
    Moyen,
    Difficile,
}

impl FromStr for QuizDifficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facile" => Ok(QuizDifficulty::Facile),
            "moyen" => Ok(QuizDifficulty::Moyen),
            "difficile" => Ok(QuizDifficulty::Difficile),
            _ => Err(new_validation_error(
                "invalid_difficulty",
                "Difficulty must be one of facile, moyen, difficile",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_correct_answer"))]
pub struct QuizQuestion {
    #[validate(custom(function = "validate_not_blank"))]
    pub question: String,

    #[validate(length(min = MIN_OPTIONS, message = "A question needs at least two options"))]
    pub options: Vec<String>,

    pub correct_answer: usize,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub questions: Json<Vec<QuizQuestion>>,
    pub time_limit: i32,
    pub passing_score: i32,
    pub category: String,
    pub difficulty: QuizDifficulty,
    pub completed: bool,
    pub score: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizInsert {
    pub title: String,
    pub description: String,
    pub questions: Vec<QuizQuestion>,
    pub time_limit: i32,
    pub passing_score: i32,
    pub category: String,
    pub difficulty: QuizDifficulty,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub questions: Option<Vec<QuizQuestion>>,
    pub time_limit: Option<i32>,
    pub passing_score: Option<i32>,
    pub category: Option<String>,
    pub difficulty: Option<QuizDifficulty>,
    pub completed: Option<bool>,
    pub score: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewQuizRequest {
    #[validate(
        required(message = "Title is required"),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Description is required"),
        custom(function = "validate_not_blank")
    )]
    pub description: Option<String>,

    #[validate(nested)]
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,

    #[validate(
        required(message = "Time limit is required"),
        range(min = 1, message = "Time limit must be at least one minute")
    )]
    pub time_limit: Option<i32>,

    #[validate(
        required(message = "Passing score is required"),
        range(min = 0, max = MAX_SCORE, message = "Passing score must be between 0 and 100")
    )]
    pub passing_score: Option<i32>,

    #[validate(
        required(message = "Category is required"),
        custom(function = "validate_not_blank")
    )]
    pub category: Option<String>,

    #[validate(
        required(message = "Difficulty is required"),
        custom(function = "validate_quiz_difficulty")
    )]
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateQuizRequest {
    #[validate(custom(function = "validate_not_blank"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(nested)]
    pub questions: Option<Vec<QuizQuestion>>,

    #[validate(range(min = 1, message = "Time limit must be at least one minute"))]
    pub time_limit: Option<i32>,

    #[validate(range(min = 0, max = MAX_SCORE, message = "Passing score must be between 0 and 100"))]
    pub passing_score: Option<i32>,

    #[validate(custom(function = "validate_not_blank"))]
    pub category: Option<String>,

    #[validate(custom(function = "validate_quiz_difficulty"))]
    pub difficulty: Option<String>,

    pub completed: Option<bool>,

    #[validate(range(min = 0, max = MAX_SCORE, message = "Score must be between 0 and 100"))]
    pub score: Option<i32>,
}

/// One entry per question; `None` means the question was skipped.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: Vec<Option<usize>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: i32,
    pub correct: usize,
    pub total: usize,
    pub passed: bool,
}

fn validate_correct_answer(question: &QuizQuestion) -> Result<(), ValidationError> {
    if question.correct_answer >= question.options.len() {
        return Err(new_validation_error(
            "correct_answer_out_of_range",
            "Correct answer must reference one of the options",
        ));
    }
    Ok(())
}

pub fn validate_quiz_difficulty(value: &str) -> Result<(), ValidationError> {
    QuizDifficulty::from_str(value).map(|_| ())
}

fn invalid_field(field: &'static str, err: ValidationError) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, err);
    errors
}

/// Wraps a failure that validation should already have caught.
fn missing_field(field: &'static str) -> ValidationErrors {
    invalid_field(field, new_validation_error("required", "Field is required"))
}

impl TryFrom<NewQuizRequest> for QuizInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewQuizRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let difficulty = value
            .difficulty
            .as_deref()
            .ok_or_else(|| missing_field("difficulty"))
            .and_then(|d| QuizDifficulty::from_str(d).map_err(|e| invalid_field("difficulty", e)))?;

        Ok(QuizInsert {
            title: value.title.map(|t| t.trim().to_string()).ok_or_else(|| missing_field("title"))?,
            description: value.description.ok_or_else(|| missing_field("description"))?,
            questions: value.questions,
            time_limit: value.time_limit.ok_or_else(|| missing_field("time_limit"))?,
            passing_score: value.passing_score.ok_or_else(|| missing_field("passing_score"))?,
            category: value.category.ok_or_else(|| missing_field("category"))?,
            difficulty,
        })
    }
}

impl TryFrom<UpdateQuizRequest> for QuizChanges {
    type Error = ValidationErrors;

    fn try_from(value: UpdateQuizRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        let difficulty = value
            .difficulty
            .as_deref()
            .map(QuizDifficulty::from_str)
            .transpose()
            .map_err(|e| invalid_field("difficulty", e))?;

        Ok(QuizChanges {
            title: value.title.map(|t| t.trim().to_string()),
            description: value.description,
            questions: value.questions,
            time_limit: value.time_limit,
            passing_score: value.passing_score,
            category: value.category,
            difficulty,
            completed: value.completed,
            score: value.score,
        })
    }
}

impl Quiz {
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions.0
    }
}
