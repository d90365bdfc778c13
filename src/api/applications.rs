use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::{delete, post},
    Router,
};
use uuid::Uuid;

use super::{AppState, SuccessfulResponse, ValidatedJson};
use crate::db::NewApplication;
use crate::error::AppError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_application))
        .route("/:application_id", delete(delete_application))
}

async fn create_application(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<NewApplication>,
) -> Result<SuccessfulResponse, AppError> {
    state.applications.create(req).await?;

    Ok(SuccessfulResponse::created())
}

async fn delete_application(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<SuccessfulResponse, AppError> {
    let Path(application_id) = path?;

    let application = state
        .applications
        .find_one_or_none(application_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    state.applications.delete(application).await?;

    Ok(SuccessfulResponse::default())
}
