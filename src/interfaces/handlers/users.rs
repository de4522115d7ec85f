use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::user::NewUser, errors::AppError, AppState};

#[instrument(skip(state, data))]
pub async fn create_user(
    state: web::Data<AppState>,
    data: web::Json<NewUser>,
) -> Result<impl Responder, AppError> {
    let user = state.user_handler.create_user(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

#[instrument(skip(state))]
pub async fn get_user(
    email: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let user = state.user_handler.get_user_by_email(&email).await?;
    Ok(HttpResponse::Ok().json(user))
}
