//! Transactional email delivery via SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport to send the three
//! account-lifecycle messages: welcome/confirmation, password-reset, and
//! password-updated. Configuration is loaded from environment variables; if
//! `SMTP_HOST` is not set, [`MailConfig::from_env`] returns `None` and the
//! server runs with mail delivery disabled.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// MailConfig
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@sprout.local";

/// Configuration for the SMTP mailer.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                |
    /// |-----------------|----------|------------------------|
    /// | `SMTP_HOST`     | yes      | —                      |
    /// | `SMTP_PORT`     | no       | `587`                  |
    /// | `SMTP_FROM`     | no       | `noreply@sprout.local` |
    /// | `SMTP_USER`     | no       | —                      |
    /// | `SMTP_PASSWORD` | no       | —                      |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
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
// Mailer
// ---------------------------------------------------------------------------

/// Sends account-lifecycle emails via SMTP.
///
/// Constructed with `Some(MailConfig)` for live delivery or `None` when mail
/// is disabled. A disabled mailer logs the skipped send and reports success:
/// running without SMTP is a deployment mode (local development, tests), not
/// a delivery failure.
pub struct Mailer {
    config: Option<MailConfig>,
}

impl Mailer {
    /// Create a mailer. Pass `None` to run with delivery disabled.
    pub fn new(config: Option<MailConfig>) -> Self {
        Self { config }
    }

    /// Whether SMTP delivery is configured.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Send the password-reset email carrying the reset token.
    pub async fn send_password_reset(&self, to: &str, token: &str) -> Result<(), MailError> {
        let body = format!(
            "We received a request to reset your password.\n\n\
             Your reset token is: {token}\n\n\
             If you did not request this, you can ignore this message."
        );
        self.send(to, "Reset your password", body).await
    }

    /// Send the confirmation that a password change went through.
    pub async fn send_password_updated(&self, to: &str) -> Result<(), MailError> {
        let body = "Your password has been updated.\n\n\
                    If you did not make this change, reset your password immediately."
            .to_string();
        self.send(to, "Your password was updated", body).await
    }

    /// Send the welcome email with the email-confirmation token.
    pub async fn send_welcome(&self, to: &str, token: &str) -> Result<(), MailError> {
        let body = format!(
            "Welcome! Confirm your email address to activate your account.\n\n\
             Your confirmation token is: {token}"
        );
        self.send(to, "Welcome — confirm your email", body).await
    }

    /// Assemble and deliver a plain-text message.
    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), MailError> {
        let Some(config) = &self.config else {
            tracing::debug!(to, subject, "Mail delivery disabled, skipping send");
            return Ok(());
        };

        let email = Message::builder()
            .from(config.from_address.parse()?)
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| MailError::Build(e.to_string()))?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
                .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let mailer = transport_builder.build();
        mailer.send(email).await?;

        tracing::info!(to, subject, "Email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_smtp_host() {
        // Ensure SMTP_HOST is not set in the test environment.
        std::env::remove_var("SMTP_HOST");
        assert!(MailConfig::from_env().is_none());
    }

    #[tokio::test]
    async fn disabled_mailer_skips_delivery() {
        let mailer = Mailer::new(None);
        assert!(!mailer.is_configured());

        // Disabled delivery is a silent no-op, not an error.
        mailer
            .send_password_reset("user@example.com", "tok")
            .await
            .unwrap();
    }

    #[test]
    fn mail_error_display_build() {
        let err = MailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn mail_error_display_address() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = MailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("Email address parse error"));
    }
}
