use std::sync::Arc;

use actix_web::HttpRequest;
use zeroize::Zeroizing;

use crate::{constants::ADMIN_TOKEN_HEADER, errors::AppError};

/// Shared-secret gate for admin operations.
///
/// A request passes when its `x-admin-token` header equals the configured
/// secret exactly. With no secret configured nothing passes.
#[derive(Clone)]
pub struct AdminGuard {
    secret: Arc<Zeroizing<String>>,
}

impl AdminGuard {
    pub fn new(secret: Zeroizing<String>) -> Self {
        if secret.is_empty() {
            tracing::warn!("Admin token not configured; admin endpoints will reject every request");
        }
        AdminGuard { secret: Arc::new(secret) }
    }

    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty()
    }

    pub fn authorize(&self, presented: Option<&str>) -> Result<(), AppError> {
        match presented {
            Some(token) if self.is_configured() && token == self.secret.as_str() => Ok(()),
            _ => Err(AppError::UnauthorizedAccess),
        }
    }

    pub fn authorize_request(&self, req: &HttpRequest) -> Result<(), AppError> {
        self.authorize(presented_token(req))
    }
}

pub fn presented_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn guard(secret: &str) -> AdminGuard {
        AdminGuard::new(Zeroizing::new(secret.to_string()))
    }

    #[test]
    fn exact_match_only() {
        let guard = guard("letmein");

        assert!(guard.authorize(Some("letmein")).is_ok());
        assert!(guard.authorize(Some("letmein ")).is_err());
        assert!(guard.authorize(Some("LETMEIN")).is_err());
        assert!(guard.authorize(None).is_err());
    }

    #[test]
    fn unconfigured_secret_rejects_empty_header() {
        let guard = guard("");
        assert!(guard.authorize(Some("")).is_err());
        assert!(guard.authorize(None).is_err());
    }

    #[test]
    fn reads_the_admin_header() {
        let req = TestRequest::default()
            .insert_header((ADMIN_TOKEN_HEADER, "letmein"))
            .to_http_request();

        assert!(guard("letmein").authorize_request(&req).is_ok());
        assert!(guard("other").authorize_request(&req).is_err());
    }
}
