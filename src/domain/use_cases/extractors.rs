use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::AppState;

/// Whether the request carries a valid admin token.
///
/// Never rejects: public endpoints use it to decide whether drafts are
/// visible. Usage: add `admin: MaybeAdmin` as a handler parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeAdmin(pub bool);

impl MaybeAdmin {
    pub fn is_admin(&self) -> bool {
        self.0
    }
}

impl FromRequest for MaybeAdmin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let authorized = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.admin_guard.authorize_request(req).is_ok())
            .unwrap_or_else(|| {
                tracing::error!("AppState missing in MaybeAdmin extractor");
                false
            });

        ready(Ok(MaybeAdmin(authorized)))
    }
}
