use std::borrow::Cow;
use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use serde::Serialize;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::entities::quiz_session::QuizSessionError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    InvalidInput(String),
    NotFound(String),
    Conflict(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::InvalidInput(msg) => write!(f, "{}", msg),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError(errors) => {
                serde_json::json!({
                    "error": "Validation failed",
                    "details": errors
                })
            }
            AppError::InternalError(msg) => {
                tracing::error!("Request failed: {}", msg);
                serde_json::json!({"error": self.to_string()})
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors = Vec::new();
        collect_field_errors(None, &errors, &mut field_errors);
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

/// Flattens nested struct and list errors into dotted paths such as
/// `questions[1].options`.
fn collect_field_errors(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let field = json_field_name(field);
        let path = match prefix {
            Some(p) => format!("{}.{}", p, field),
            None => field,
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                }));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_field_errors(Some(&path), nested, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item_path = format!("{}[{}]", path, index);
                    collect_field_errors(Some(&item_path), nested, out);
                }
            }
        }
    }
}

/// Request bodies are camelCase, so `actual_hours` is reported as
/// `actualHours`. Schema-level keys such as `__all__` pass through.
fn json_field_name(field: &str) -> String {
    if field.starts_with('_') {
        return field.to_string();
    }

    let mut name = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            name.extend(c.to_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name
}

impl AppError {
    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("Record already exists".into())
            }
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23503")) => {
                AppError::Conflict("Foreign key violation".into())
            }
            _ => AppError::InternalError(format!("Database error: {}", err))
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(format!("IO error: {}", err))
    }
}

impl From<QuizSessionError> for AppError {
    fn from(err: QuizSessionError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Validate)]
    struct Inner {
        #[validate(length(min = 2, message = "Too short"))]
        name: String,
    }

    #[derive(Debug, Validate)]
    struct Outer {
        #[validate(required(message = "Title is required"))]
        title: Option<String>,
        #[validate(range(min = 0.5, message = "Minimum is 0.5 hours"))]
        hours: f64,
        #[validate(nested)]
        items: Vec<Inner>,
    }

    #[test]
    fn validation_errors_are_flattened_and_sorted() {
        let outer = Outer {
            title: None,
            hours: 0.25,
            items: vec![Inner { name: "ok".into() }, Inner { name: "x".into() }],
        };

        let err = AppError::from(outer.validate().unwrap_err());
        let AppError::ValidationError(fields) = err else {
            panic!("expected validation error");
        };

        let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, vec!["hours", "items[1].name", "title"]);
        assert_eq!(fields[2].message, "Title is required");
    }

    #[derive(Debug, Validate)]
    struct Patch {
        #[validate(range(min = 0.0, message = "Actual hours cannot be negative"))]
        actual_hours: f64,
        #[validate(nested)]
        questions: Vec<Question>,
    }

    #[derive(Debug, Validate)]
    struct Question {
        #[validate(range(max = 1, message = "Out of range"))]
        correct_answer: usize,
    }

    #[test]
    fn field_paths_use_request_casing() {
        let patch = Patch {
            actual_hours: -2.0,
            questions: vec![Question { correct_answer: 0 }, Question { correct_answer: 4 }],
        };

        let err = AppError::from(patch.validate().unwrap_err());
        let AppError::ValidationError(fields) = err else {
            panic!("expected validation error");
        };

        let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(names, vec!["actualHours", "questions[1].correctAnswer"]);
    }

    #[test]
    fn schema_level_keys_are_kept() {
        assert_eq!(json_field_name("__all__"), "__all__");
        assert_eq!(json_field_name("github_url"), "githubUrl");
        assert_eq!(json_field_name("title"), "title");
    }

    #[test]
    fn status_codes_follow_error_class() {
        assert_eq!(AppError::ValidationError(vec![]).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidInput("bad".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("Project not found".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("dup".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::InternalError("boom".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_error_keeps_underlying_message() {
        let err = AppError::from(std::io::Error::other("disk full"));
        assert!(err.to_string().contains("disk full"));
    }
}
