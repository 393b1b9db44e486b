use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use zeroize::Zeroizing;

use crate::{
    entities::contact::ContactMessage,
    errors::MailError,
    mail::mailer::Mailer,
    settings::AppConfig,
};

struct SmtpInner {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    owner: Address,
}

/// SMTP relay with the owner's mailbox as both sender and recipient.
///
/// Without credentials the mailer still builds, but every send fails with
/// [`MailError::NotConfigured`].
pub struct SmtpMailer {
    inner: Option<SmtpInner>,
}

impl SmtpMailer {
    pub fn new(config: &AppConfig) -> Result<Self, MailError> {
        let user = config.email_user.trim();
        let password = Zeroizing::new(config.email_password.clone());

        if user.is_empty() || password.is_empty() {
            tracing::warn!("Email credentials missing; contact form will fail to send");
            return Ok(SmtpMailer { inner: None });
        }

        let owner: Address = user.parse()?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .credentials(Credentials::new(user.to_string(), password.to_string()))
            .build();

        Ok(SmtpMailer {
            inner: Some(SmtpInner { transport, owner }),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

/// Providers reject spoofed senders, so the submitter only appears in Reply-To.
pub fn build_contact_email(owner: &Address, message: &ContactMessage) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(Mailbox::new(Some(message.name.clone()), owner.clone()))
        .to(Mailbox::new(None, owner.clone()))
        .subject(message.subject())
        .header(ContentType::TEXT_PLAIN);

    match message.email.trim().parse::<Address>() {
        Ok(address) => {
            builder = builder.reply_to(Mailbox::new(Some(message.name.clone()), address));
        }
        Err(e) => {
            tracing::warn!("Skipping Reply-To for unparseable address: {}", e);
        }
    }

    Ok(builder.body(message.body())?)
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_contact_message(&self, message: &ContactMessage) -> Result<(), MailError> {
        let inner = self.inner.as_ref().ok_or(MailError::NotConfigured)?;
        let email = build_contact_email(&inner.owner, message)?;

        inner.transport.send(email).await?;
        tracing::info!("Contact message from {} delivered", message.email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::tests::test_config;

    fn message(email: &str) -> ContactMessage {
        ContactMessage {
            name: "Ada".into(),
            email: email.into(),
            message: "Hello there".into(),
        }
    }

    #[test]
    fn email_replies_to_the_submitter() {
        let owner: Address = "owner@example.com".parse().unwrap();
        let email = build_contact_email(&owner, &message("ada@example.com")).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();

        assert!(raw.contains("Reply-To: Ada <ada@example.com>"));
        assert!(raw.contains("To: owner@example.com"));
        assert!(raw.contains("Subject: New contact form submission from Ada"));
    }

    #[test]
    fn bad_reply_address_still_builds() {
        let owner: Address = "owner@example.com".parse().unwrap();
        let email = build_contact_email(&owner, &message("not an address")).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();
        assert!(!raw.contains("Reply-To"));
    }

    #[tokio::test]
    async fn unconfigured_mailer_refuses_to_send() {
        let mut config = test_config();
        config.email_password = String::new();

        let mailer = SmtpMailer::new(&config).unwrap();
        assert!(!mailer.is_configured());
        assert!(matches!(
            mailer.send_contact_message(&message("a@b.com")).await,
            Err(MailError::NotConfigured)
        ));
    }
}
