use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::quiz::{NewQuizRequest, SubmitQuizRequest, UpdateQuizRequest},
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_quizzes(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let quizzes = state.quiz_handler.list_quizzes().await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[instrument(skip(state, data))]
pub async fn create_quiz(
    state: web::Data<AppState>,
    data: web::Json<NewQuizRequest>,
) -> Result<impl Responder, AppError> {
    let quiz = state.quiz_handler.create_quiz(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(quiz))
}

#[instrument(skip(state))]
pub async fn get_quiz(
    quiz_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let quiz = state.quiz_handler.get_quiz(&quiz_id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[instrument(skip(state, data))]
pub async fn update_quiz(
    quiz_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateQuizRequest>,
) -> Result<impl Responder, AppError> {
    let quiz = state
        .quiz_handler
        .update_quiz(&quiz_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[instrument(skip(state, data))]
pub async fn submit_quiz(
    quiz_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<SubmitQuizRequest>,
) -> Result<impl Responder, AppError> {
    let result = state
        .quiz_handler
        .submit_answers(&quiz_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
