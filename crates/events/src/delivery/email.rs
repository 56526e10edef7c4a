//! Plain-text email delivery via SMTP.
//!
//! [`EmailDelivery`] wraps the `lettre` async SMTP transport. Configuration is
//! read from the environment; when `SMTP_HOST` is unset
//! [`EmailConfig::from_env`] returns `None` and email is disabled.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

const DEFAULT_FROM_ADDRESS: &str = "noreply@progress-tracker.local";

/// SMTP settings.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable        | Required | Default                           |
    /// |-----------------|----------|-----------------------------------|
    /// | `SMTP_HOST`     | yes      | (email disabled when unset)       |
    /// | `SMTP_PORT`     | no       | `587`                             |
    /// | `SMTP_FROM`     | no       | `noreply@progress-tracker.local`  |
    /// | `SMTP_USER`     | no       |                                   |
    /// | `SMTP_PASSWORD` | no       |                                   |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok().filter(|h| !h.is_empty())?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// EmailMessage
// ---------------------------------------------------------------------------

/// A composed plain-text message addressed to one or more recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends [`EmailMessage`]s via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Assemble the MIME message without sending it.
    fn build(&self, message: &EmailMessage) -> Result<Message, EmailError> {
        if message.to.is_empty() {
            return Err(EmailError::Build("no recipients".to_string()));
        }
        let mut builder = Message::builder()
            .from(self.config.from_address.parse()?)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_PLAIN);
        for recipient in &message.to {
            builder = builder.to(recipient.parse()?);
        }
        builder
            .body(message.body.clone())
            .map_err(|e| EmailError::Build(e.to_string()))
    }

    /// Send one message to all of its recipients.
    pub async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let email = self.build(message)?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(pass)) = (&self.config.smtp_user, &self.config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport_builder.build().send(email).await?;

        tracing::info!(
            recipients = message.to.len(),
            subject = %message.subject,
            "Email sent"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery() -> EmailDelivery {
        EmailDelivery::new(EmailConfig {
            smtp_host: "localhost".into(),
            smtp_port: DEFAULT_SMTP_PORT,
            from_address: DEFAULT_FROM_ADDRESS.into(),
            smtp_user: None,
            smtp_password: None,
        })
    }

    fn message(to: &[&str]) -> EmailMessage {
        EmailMessage {
            to: to.iter().map(|s| s.to_string()).collect(),
            subject: "Approval needed: \"Launch portal\" was updated".into(),
            body: "body".into(),
        }
    }

    #[test]
    fn build_accepts_multiple_recipients() {
        let built = delivery()
            .build(&message(&["a@example.ie", "b@example.ie"]))
            .unwrap();
        assert_eq!(built.envelope().to().len(), 2);
    }

    #[test]
    fn build_rejects_empty_recipient_list() {
        let err = delivery().build(&message(&[])).unwrap_err();
        assert!(matches!(err, EmailError::Build(_)));
    }

    #[test]
    fn build_rejects_bad_address() {
        let err = delivery().build(&message(&["not-an-email"])).unwrap_err();
        assert!(err.to_string().contains("Email address parse error"));
    }
}
