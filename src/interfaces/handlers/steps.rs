use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::step::{NewStepRequest, ReorderStepsRequest, UpdateStepRequest},
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_steps(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let steps = state.step_handler.list_steps(&project_id).await?;
    Ok(HttpResponse::Ok().json(steps))
}

#[instrument(skip(state, data))]
pub async fn create_step(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<NewStepRequest>,
) -> Result<impl Responder, AppError> {
    let step = state
        .step_handler
        .create_step(&project_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(step))
}

#[instrument(skip(state, data))]
pub async fn reorder_steps(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<ReorderStepsRequest>,
) -> Result<impl Responder, AppError> {
    let steps = state
        .step_handler
        .reorder_steps(&project_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(steps))
}

#[instrument(skip(state))]
pub async fn seed_default_steps(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let steps = state.step_handler.seed_default_steps(&project_id).await?;
    Ok(HttpResponse::Created().json(steps))
}

#[instrument(skip(state))]
pub async fn get_step(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let (project_id, step_id) = path.into_inner();
    let step = state.step_handler.get_step(&project_id, &step_id).await?;
    Ok(HttpResponse::Ok().json(step))
}

#[instrument(skip(state, data))]
pub async fn update_step(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
    data: web::Json<UpdateStepRequest>,
) -> Result<impl Responder, AppError> {
    let (project_id, step_id) = path.into_inner();
    let step = state
        .step_handler
        .update_step(&project_id, &step_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(step))
}

#[instrument(skip(state))]
pub async fn delete_step(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let (project_id, step_id) = path.into_inner();
    state.step_handler.delete_step(&project_id, &step_id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Step deleted" })))
}
