//! SMTP notification mailer for admin-triggered tenant emails.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use lodgera_core::config::SmtpConfig;
use lodgera_core::AppError;
use std::sync::Arc;

#[derive(Clone)]
pub struct Mailer {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl Mailer {
    /// Build the mailer from SMTP settings. Returns `None` when the
    /// relay cannot be constructed, leaving notification endpoints in
    /// their unconfigured failure mode.
    pub fn from_config(smtp: &SmtpConfig) -> Option<Self> {
        let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
            .ok()?
            .port(smtp.port);

        let builder = if !smtp.user.is_empty() {
            builder.credentials(Credentials::new(smtp.user.clone(), smtp.password.clone()))
        } else {
            builder
        };

        tracing::info!(host = %smtp.host, port = smtp.port, "Notification mailer initialized");

        Some(Self {
            transport: Arc::new(builder.build()),
            from: smtp.from.clone(),
        })
    }

    /// Send a plain-text email to a single recipient.
    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let from: Mailbox = self
            .from
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid SMTP_FROM address: {}", e)))?;
        let to: Mailbox = to
            .parse()
            .map_err(|_| AppError::InvalidInput("Invalid recipient address".to_string()))?;

        let email = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        tracing::info!("Notification email sent");
        Ok(())
    }
}
