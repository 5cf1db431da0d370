//! Mail Dispatch — one outbound send through an SMTP relay via lettre.
//!
//! `AppState` holds an `Arc<dyn MailTransport>`; `SmtpMailer` is the
//! production backend. There is no retry: one attempt per request.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use thiserror::Error;
use tracing::info;

use crate::mail::render::render_html_body;

pub const DEFAULT_SUBJECT: &str = "Job Application";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid {field} address '{value}': {source}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("Failed to build email: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP relay error: {0}")]
    Relay(#[source] lettre::transport::smtp::Error),

    #[error("SMTP send failed: {0}")]
    Send(#[source] lettre::transport::smtp::Error),

    #[error("Mail task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A fully specified message ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    /// Plain-text draft as edited by the user.
    pub body: String,
}

/// Sends a single message. Swappable so handlers can be tested without SMTP.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

pub fn parse_mailbox(field: &'static str, value: &str) -> Result<Mailbox, MailError> {
    value
        .trim()
        .parse::<Mailbox>()
        .map_err(|source| MailError::InvalidAddress {
            field,
            value: value.to_string(),
            source,
        })
}

/// Builds a `multipart/alternative` message carrying the plain draft and its HTML rendering.
pub fn build_message(from: &Mailbox, mail: &OutgoingMail) -> Result<Message, MailError> {
    let subject = if mail.subject.trim().is_empty() {
        DEFAULT_SUBJECT
    } else {
        mail.subject.trim()
    };

    let message = Message::builder()
        .from(from.clone())
        .to(parse_mailbox("recipient", &mail.to)?)
        .subject(subject)
        .multipart(MultiPart::alternative_plain_html(
            mail.body.clone(),
            render_html_body(&mail.body),
        ))?;

    Ok(message)
}

/// SMTP transport authenticated with the configured account. The account
/// address is also the `From` mailbox.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(host: &str, username: String, password: String) -> Result<Self, MailError> {
        let from = parse_mailbox("sender", &username)?;
        let creds = Credentials::new(username, password);

        let transport = SmtpTransport::relay(host)
            .map_err(MailError::Relay)?
            .credentials(creds)
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let message = build_message(&self.from, &mail)?;
        let transport = self.transport.clone();

        // lettre's SmtpTransport is blocking.
        tokio::task::spawn_blocking(move || transport.send(&message))
            .await?
            .map_err(MailError::Send)?;

        info!("Email sent to {}", mail.to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from() -> Mailbox {
        parse_mailbox("sender", "jane@example.com").unwrap()
    }

    fn mail(to: &str, subject: &str) -> OutgoingMail {
        OutgoingMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: "Dear Hiring Team,\n\nPlease find my resume <here>.".to_string(),
        }
    }

    #[test]
    fn test_build_message_carries_plain_and_html_parts() {
        let message = build_message(&from(), &mail("hr@acme.com", "Job Application for Engineer role"))
            .unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("To: hr@acme.com"));
        assert!(raw.contains("From: jane@example.com"));
        assert!(raw.contains("Subject: Job Application for Engineer role"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("<p>Please find my resume &lt;here&gt;.</p>"));
    }

    #[test]
    fn test_blank_subject_falls_back_to_default() {
        let message = build_message(&from(), &mail("hr@acme.com", "  ")).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Subject: Job Application\r\n"));
    }

    #[test]
    fn test_invalid_recipient_is_rejected() {
        let err = build_message(&from(), &mail("not-an-address", "Hi")).unwrap_err();
        assert!(matches!(
            err,
            MailError::InvalidAddress { field: "recipient", .. }
        ));
    }
}
