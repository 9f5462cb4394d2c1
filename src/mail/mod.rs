//! Outbound email through an authenticated SMTP relay.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;
use thiserror::Error;

use crate::core::errors::ApiError;

pub const SMTP_HOST: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 587;

/// A single outbound message. Constructed per request, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Failure anywhere on the delivery path. Not retried.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("failed to build email message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("email sending failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

impl From<DeliveryError> for ApiError {
    fn from(err: DeliveryError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Delivers one message, synchronously within the request.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError>;
}

/// Mailer backed by the fixed Gmail relay. The connection is opened,
/// upgraded via STARTTLS, authenticated, and closed per send.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
}

impl SmtpMailer {
    /// Builds the transport from the configured relay credentials. Bad or
    /// missing credentials are not detected here; the relay rejects them at
    /// send time.
    pub fn new(username: String, password: String) -> Result<Self, DeliveryError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(SMTP_HOST)?
            .port(SMTP_PORT)
            .credentials(Credentials::new(username.clone(), password))
            .build();

        Ok(Self {
            transport,
            sender: username,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        let email = build_message(&self.sender, message)?;
        self.transport.send(email).await?;
        tracing::info!(recipient = %message.recipient, "email sent");
        Ok(())
    }
}

fn build_message(sender: &str, message: &EmailMessage) -> Result<Message, DeliveryError> {
    let from: Mailbox = sender.parse()?;
    let to: Mailbox = message.recipient.parse()?;

    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(recipient: &str) -> EmailMessage {
        EmailMessage {
            recipient: recipient.to_string(),
            subject: "Hello".to_string(),
            body: "Plain text body".to_string(),
        }
    }

    #[test]
    fn builds_a_plain_text_message_for_a_valid_recipient() {
        let email = build_message("sender@example.com", &message("someone@example.com"))
            .expect("message should build");

        let formatted = String::from_utf8(email.formatted()).expect("utf8");
        assert!(formatted.contains("To: someone@example.com"));
        assert!(formatted.contains("From: sender@example.com"));
        assert!(formatted.contains("Subject: Hello"));
    }

    #[test]
    fn invalid_recipient_fails_before_any_network_io() {
        let err = build_message("sender@example.com", &message("not an address")).unwrap_err();
        assert!(matches!(err, DeliveryError::Address(_)));
    }

    #[test]
    fn invalid_sender_fails_the_same_way() {
        let err = build_message("", &message("someone@example.com")).unwrap_err();
        assert!(matches!(err, DeliveryError::Address(_)));
    }

    #[test]
    fn email_request_deserializes_from_the_wire_shape() {
        let raw = r#"{"recipient":"a@b.c","subject":"s","body":"b"}"#;
        let parsed: EmailMessage = serde_json::from_str(raw).expect("deserialize");
        assert_eq!(parsed.recipient, "a@b.c");
        assert_eq!(parsed.subject, "s");
        assert_eq!(parsed.body, "b");
    }
}
