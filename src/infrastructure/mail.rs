pub mod mailer;
pub mod smtp;
