use std::sync::Arc;

use crate::{
    entities::contact::{ContactMessage, ContactRequest, ContactResponse},
    errors::AppError,
    mail::mailer::Mailer,
};

pub struct ContactHandler {
    pub mailer: Arc<dyn Mailer>,
}

impl ContactHandler {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        ContactHandler { mailer }
    }

    /// Presence-checks the submission and forwards it by email.
    pub async fn send_contact_message(&self, request: ContactRequest) -> Result<ContactResponse, AppError> {
        let message = ContactMessage::try_from(request)?;

        self.mailer.send_contact_message(&message).await?;

        Ok(ContactResponse {
            message: "Email sent successfully".to_string(),
        })
    }
}
