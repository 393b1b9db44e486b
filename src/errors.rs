use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    /// Missing required fields. The summary is the client-facing message.
    ValidationError {
        summary: String,
        details: Vec<FieldError>,
    },
    UnauthorizedAccess,
    NotConfigured(String),
    /// GitHub or mail provider failure. Detail is logged, never returned.
    UpstreamError(String),
    /// Database failure of any kind, including a missing row.
    StoreError(String),
    /// Public message already safe to return to the client.
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError { summary, details } => {
                let messages = details.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "{}: {}", summary, messages)
            }
            AppError::UnauthorizedAccess => write!(f, "Unauthorized"),
            AppError::NotConfigured(msg) => write!(f, "{}", msg),
            AppError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            AppError::StoreError(msg) => write!(f, "Store error: {}", msg),
            AppError::InternalError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn validation(summary: impl Into<String>, errors: ValidationErrors) -> Self {
        AppError::ValidationError {
            summary: summary.into(),
            details: field_errors(&errors),
        }
    }

    /// Replaces server-side failures with a client-safe message after
    /// logging the full detail. Client-facing variants pass through.
    pub fn public(self, client_message: &str) -> Self {
        match self {
            AppError::UpstreamError(_) | AppError::StoreError(_) => {
                tracing::error!(error = %self, "{}", client_message);
                AppError::InternalError(client_message.to_string())
            }
            other => other,
        }
    }

    pub fn to_http_response(&self) -> HttpResponse {
        self.error_response()
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError { summary, details } => {
                serde_json::json!({
                    "error": summary,
                    "details": details
                })
            }
            AppError::UpstreamError(_) | AppError::StoreError(_) => {
                tracing::error!(error = %self, "Unhandled server error");
                serde_json::json!({"error": "Internal server error"})
            }
            _ => {
                serde_json::json!({"error": self.to_string()})
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::UnauthorizedAccess => StatusCode::UNAUTHORIZED,
            AppError::NotConfigured(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(|e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string()),
            })
        })
        .collect();

    // field_errors() is backed by a HashMap
    details.sort_by(|a, b| a.field.cmp(&b.field));
    details
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::validation("Validation failed", errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::StoreError("Record not found".into()),
            _ => AppError::StoreError(format!("Database error: {}", err))
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::StoreError(format!("Migration error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::UpstreamError(format!("HTTP error: {}", err))
    }
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[derive(Debug, Display)]
pub enum MailError {
    #[display("Invalid mailbox address: {_0}")]
    InvalidAddress(String),

    #[display("Failed to build message: {_0}")]
    Build(String),

    #[display("SMTP transport error: {_0}")]
    Transport(String),

    #[display("Mail credentials are not configured")]
    NotConfigured,
}

impl std::error::Error for MailError {}

impl From<lettre::address::AddressError> for MailError {
    fn from(err: lettre::address::AddressError) -> Self {
        MailError::InvalidAddress(err.to_string())
    }
}

impl From<lettre::error::Error> for MailError {
    fn from(err: lettre::error::Error) -> Self {
        MailError::Build(err.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for MailError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        MailError::Transport(err.to_string())
    }
}

#[derive(Debug, Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
