use std::time::Duration;

use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use serde::{Deserialize, Serialize};

use crate::{constants::START_TIME, AppState};

pub const HEALTHY_STATUS: &str = "Backend is running";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthCheckResponse {
    pub status: String,
    pub uptime: String,
    pub timestamp: String,
    pub database: String,
    pub version: String,
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now_utc = Utc::now();
    let uptime = now_utc.signed_duration_since(*START_TIME).num_seconds().max(0) as u64;

    let database = match state.project_handler.project_repo.check_connection().await {
        Ok(_) => "OK",
        Err(e) => {
            tracing::warn!("Health check could not reach the store: {}", e);
            "Unavailable"
        }
    };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: HEALTHY_STATUS.to_string(),
        uptime: format_duration(Duration::from_secs(uptime)).to_string(),
        timestamp: now_utc.to_rfc3339(),
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
