use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, use_cases::upload::ReceivedFile, AppState};

#[derive(Debug, MultipartForm)]
pub struct CvUploadForm {
    pub cv: Option<TempFile>,
    pub email: Option<Text<String>>,
}

/// Any extraction failure, including a body that is not multipart at all,
/// is answered with 400.
#[instrument(skip(state, form))]
pub async fn upload_cv(
    state: web::Data<AppState>,
    form: Result<MultipartForm<CvUploadForm>, actix_web::Error>,
) -> Result<impl Responder, AppError> {
    let form = form
        .map_err(|e| AppError::InvalidInput(format!("Multipart payload error: {}", e)))?
        .into_inner();
    let file = form.cv.as_ref().map(|cv| ReceivedFile {
        path: cv.file.path().to_path_buf(),
        content_type: cv.content_type.as_ref().map(|mime| mime.essence_str().to_string()),
        size: cv.size,
    });
    let email = form.email.map(|email| email.into_inner());

    let response = state.upload_handler.upload_cv(email, file).await?;
    Ok(HttpResponse::Ok().json(response))
}
