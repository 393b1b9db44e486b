use actix_cors::Cors;
use actix_web::http::{header, Method};

use crate::constants::ADMIN_TOKEN_HEADER;

/// Builds the CORS policy from the configured origin list.
///
/// An empty list allows every origin, matching how the site has always been
/// deployed behind a single static host.
pub fn cors_policy(origins: &[String]) -> Cors {
    let base = if origins.is_empty() || origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS allows every origin");
        Cors::default().allow_any_origin()
    } else {
        origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    base.allowed_methods(vec![Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(ADMIN_TOKEN_HEADER),
        ])
        .max_age(3600)
}
