use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::project::{NewProject, ProjectQuery, UpdateProject},
    errors::AppError,
    use_cases::extractors::MaybeAdmin,
    AppState,
};

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<NewProject>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler
        .create_project(data.into_inner())
        .await
        .map_err(|e| e.public("Failed to create project"))?;

    tracing::info!(project_id = %project.id, "Project created");
    Ok(HttpResponse::Created().json(project))
}

#[instrument(skip(state, query))]
pub async fn list_projects(
    admin: MaybeAdmin,
    state: web::Data<AppState>,
    query: web::Query<ProjectQuery>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler
        .list_projects(&query, admin.is_admin())
        .await
        .map_err(|e| e.public("Failed to fetch projects"))?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn delete_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler
        .delete_project(&project_id)
        .await
        .map_err(|e| e.public("Failed to delete project"))?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state, data))]
pub async fn update_project(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<UpdateProject>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler
        .update_project(&project_id, &data)
        .await
        .map_err(|e| e.public("Failed to update project"))?;

    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(state))]
pub async fn track_view(
    project_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let recorded = state.project_handler
        .track_view(&project_id)
        .await
        .map_err(|e| e.public("Failed to track view"))?;

    Ok(HttpResponse::Ok().json(recorded))
}
