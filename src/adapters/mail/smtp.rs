//! SMTP delivery through lettre
//!
//! One authenticated connection per delivery: port 465 uses implicit TLS,
//! every other port upgrades with STARTTLS. The transport is built without a
//! connection pool, so the socket is closed when `deliver` returns.

use super::message::{compose_report_message, ReportMessage};
use super::traits::ReportMailer;
use crate::config::{MailConfig, SecretString};
use crate::domain::{AttendanceError, ReportDate, Result};
use async_trait::async_trait;
use chrono::Local;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use secrecy::ExposeSecret;
use std::path::Path;
use std::time::Duration;

const IMPLICIT_TLS_PORT: u16 = 465;

/// [`ReportMailer`] over an authenticated SMTP relay
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    from: String,
    password: SecretString,
    to: String,
    smtp_server: String,
    smtp_port: u16,
    timeout: Duration,
    device_label: String,
}

impl SmtpMailer {
    /// Create a mailer from mail configuration
    ///
    /// `device_label` names the source terminal in the message body.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the sender address or password is
    /// missing.
    pub fn from_config(config: &MailConfig, device_label: impl Into<String>) -> Result<Self> {
        config
            .validate_for_delivery()
            .map_err(AttendanceError::Configuration)?;

        let (Some(from), Some(password)) = (config.from.clone(), config.password.clone()) else {
            return Err(AttendanceError::Configuration(
                "mail.from and mail.password are required for delivery".to_string(),
            ));
        };

        Ok(Self {
            from,
            password,
            to: config.to.clone(),
            smtp_server: config.smtp_server.clone(),
            smtp_port: config.smtp_port,
            timeout: Duration::from_secs(config.timeout_seconds),
            device_label: device_label.into(),
        })
    }

    /// Recipient address
    pub fn recipient(&self) -> &str {
        &self.to
    }

    /// True if the relay is reached with implicit TLS rather than STARTTLS
    pub fn uses_implicit_tls(&self) -> bool {
        self.smtp_port == IMPLICIT_TLS_PORT
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let builder = if self.uses_implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.smtp_server)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.smtp_server)
        }
        .map_err(|e| {
            AttendanceError::Delivery(format!(
                "Invalid SMTP relay {}: {}",
                self.smtp_server, e
            ))
        })?;

        let password: &str = self.password.expose_secret().as_ref();
        Ok(builder
            .port(self.smtp_port)
            .credentials(Credentials::new(self.from.clone(), password.to_string()))
            .timeout(Some(self.timeout))
            .build())
    }
}

#[async_trait]
impl ReportMailer for SmtpMailer {
    async fn deliver(&self, artifact: &Path, date: ReportDate) -> Result<()> {
        let content = tokio::fs::read(artifact).await.map_err(|e| {
            AttendanceError::Delivery(format!(
                "Cannot read artifact {}: {}",
                artifact.display(),
                e
            ))
        })?;
        let attachment_name = artifact
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                AttendanceError::Delivery(format!(
                    "Artifact path has no file name: {}",
                    artifact.display()
                ))
            })?;

        let message = compose_report_message(ReportMessage {
            from: &self.from,
            to: &self.to,
            report_date: date,
            generated_at: Local::now().naive_local(),
            device_label: &self.device_label,
            attachment_name,
            attachment: content,
        })?;

        let transport = self.transport()?;
        let response = transport.send(message).await.map_err(|e| {
            AttendanceError::Delivery(format!(
                "SMTP send via {}:{} failed: {}",
                self.smtp_server, self.smtp_port, e
            ))
        })?;

        tracing::info!(
            recipient = %self.to,
            relay = %self.smtp_server,
            code = %response.code(),
            "Report email sent"
        );
        Ok(())
    }
}
