use axum::{Json, extract::State};
use std::sync::Arc;

use super::ApiError;
use crate::models::{AsRecord, ProjectRecord};
use crate::state::AppState;

/// `GET /api/projects`: completed projects, newest first.
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProjectRecord>>, ApiError> {
    let projects = state.store().projects().list_completed().await?;
    Ok(Json(projects.iter().map(AsRecord::as_record).collect()))
}

/// `GET /api/projects/featured`: the projects shown on the home page.
pub async fn list_featured(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProjectRecord>>, ApiError> {
    let projects = state.store().projects().list_featured().await?;
    Ok(Json(projects.iter().map(AsRecord::as_record).collect()))
}
