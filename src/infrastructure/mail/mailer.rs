use async_trait::async_trait;

use crate::{entities::contact::ContactMessage, errors::MailError};

/// Delivers contact-form submissions to the site owner.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_contact_message(&self, message: &ContactMessage) -> Result<(), MailError>;
}
