use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::admin::AnalyticsQuery, errors::AppError, AppState};

// The admin guard middleware has already checked the token for this scope.

#[instrument(skip(state))]
pub async fn admin_stats(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let stats = state.admin_handler
        .stats()
        .await
        .map_err(|e| e.public("Failed to fetch stats"))?;

    Ok(HttpResponse::Ok().json(stats))
}

#[instrument(skip(state))]
pub async fn admin_list_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.admin_handler
        .all_projects()
        .await
        .map_err(|e| e.public("Failed to fetch projects"))?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state, query))]
pub async fn admin_analytics(
    state: web::Data<AppState>,
    query: web::Query<AnalyticsQuery>,
) -> Result<impl Responder, AppError> {
    let analytics = state.admin_handler
        .analytics(query.days)
        .await
        .map_err(|e| e.public("Failed to fetch analytics"))?;

    Ok(HttpResponse::Ok().json(analytics))
}
