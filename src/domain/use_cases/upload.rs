use std::{path::PathBuf, sync::Arc};

use chrono::Utc;

use crate::{
    constants::PDF_MIME_TYPE,
    entities::user::CvUploadResponse,
    errors::AppError,
    repositories::user::UserRepository,
    settings::AppConfig,
    utils::uploads::{cv_filename, describe_size, public_url},
};

/// A file already received by the multipart extractor, not yet published.
#[derive(Debug, Clone)]
pub struct ReceivedFile {
    pub path: PathBuf,
    pub content_type: Option<String>,
    pub size: usize,
}

pub struct UploadHandler {
    pub user_repo: Arc<dyn UserRepository>,
    pub upload_dir: PathBuf,
    pub url_prefix: String,
    pub max_bytes: usize,
}

impl UploadHandler {
    pub fn new(user_repo: Arc<dyn UserRepository>, config: &AppConfig) -> Self {
        UploadHandler {
            user_repo,
            upload_dir: config.upload_dir.clone(),
            url_prefix: config.upload_url_prefix.clone(),
            max_bytes: config.max_upload_bytes,
        }
    }

    /// Stores a CV and points the matching user's `cv_url` at it.
    ///
    /// Every input check runs before the upload directory is touched. The
    /// file is written before the user lookup, so an unknown email still
    /// leaves the copy on disk.
    pub async fn upload_cv(
        &self,
        email: Option<String>,
        file: Option<ReceivedFile>,
    ) -> Result<CvUploadResponse, AppError> {
        let email = email.map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
        let (Some(email), Some(file)) = (email, file) else {
            return Err(AppError::InvalidInput("Missing file or email".to_string()));
        };

        if file.content_type.as_deref() != Some(PDF_MIME_TYPE) {
            return Err(AppError::InvalidInput("Only PDF files are allowed".to_string()));
        }

        if file.size > self.max_bytes {
            return Err(AppError::InvalidInput(format!(
                "File must not exceed {}",
                describe_size(self.max_bytes)
            )));
        }

        tokio::fs::create_dir_all(&self.upload_dir).await.map_err(|e| {
            AppError::InternalError(format!("Could not create upload directory: {}", e))
        })?;

        let filename = cv_filename(&email, Utc::now().timestamp_millis());
        let destination = self.upload_dir.join(&filename);

        tokio::fs::copy(&file.path, &destination).await.map_err(|e| {
            AppError::InternalError(format!("Could not save uploaded file: {}", e))
        })?;

        let url = public_url(&self.url_prefix, &filename);

        let user = self
            .user_repo
            .set_cv_url(email.clone(), url.clone())
            .await?;

        if user.is_none() {
            tracing::warn!(file = %destination.display(), "CV stored for unknown user");
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tracing::info!(email = %email, url = %url, "CV uploaded");

        Ok(CvUploadResponse {
            message: "CV uploaded and saved successfully".to_string(),
            url,
        })
    }
}
