use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{entities::contact::ContactRequest, errors::AppError, AppState};

#[instrument(skip(state, form))]
pub async fn send_contact_message(
    state: web::Data<AppState>,
    form: web::Json<ContactRequest>,
) -> Result<impl Responder, AppError> {
    let response = state.contact_handler
        .send_contact_message(form.into_inner())
        .await
        .map_err(|e| e.public("Failed to send email"))?;

    Ok(HttpResponse::Ok().json(response))
}
