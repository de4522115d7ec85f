use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;


#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub cv_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

impl NewUser {
    /// Emails are matched exactly by the upload endpoint, so only surrounding
    /// whitespace is dropped.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct CvUploadResponse {
    pub message: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_format_is_validated() {
        assert!(NewUser { email: "learner@example.com".into() }.validate().is_ok());
        assert!(NewUser { email: "learner-at-example".into() }.validate().is_err());
    }

    #[test]
    fn user_serializes_cv_url_in_camel_case() {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: "learner@example.com".into(),
            cv_url: Some("/uploads/cv.pdf".into()),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["cvUrl"], "/uploads/cv.pdf");
    }
}
