use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::AppError;

pub const MISSING_CONTACT_FIELDS: &str = "Name, email, and message are required";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(required(message = "name is required"), length(min = 1, message = "name is required"))]
    pub name: Option<String>,

    #[validate(required(message = "email is required"), length(min = 1, message = "email is required"))]
    pub email: Option<String>,

    #[validate(required(message = "message is required"), length(min = 1, message = "message is required"))]
    pub message: Option<String>,
}

impl ContactRequest {
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        ContactRequest {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }
}

/// A submission that passed the presence checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    pub fn subject(&self) -> String {
        format!("New contact form submission from {}", self.name)
    }

    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}\n",
            self.name, self.email, self.message
        )
    }
}

impl TryFrom<ContactRequest> for ContactMessage {
    type Error = AppError;

    fn try_from(req: ContactRequest) -> Result<Self, Self::Error> {
        req.validate()
            .map_err(|e| AppError::validation(MISSING_CONTACT_FIELDS, e))?;

        match (req.name, req.email, req.message) {
            (Some(name), Some(email), Some(message)) => Ok(ContactMessage { name, email, message }),
            _ => Err(AppError::InternalError(MISSING_CONTACT_FIELDS.into())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactResponse {
    pub message: String,
}
