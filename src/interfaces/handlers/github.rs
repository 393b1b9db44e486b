use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

/// Returns import candidates only; the client creates the ones it keeps.
#[instrument(skip(state))]
pub async fn sync_github(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let candidates = state.github_handler
        .sync()
        .await
        .map_err(|e| e.public("Failed to sync GitHub repos"))?;

    Ok(HttpResponse::Ok().json(candidates))
}
