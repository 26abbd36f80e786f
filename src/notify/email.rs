// src/notify/email.rs
//! SMTP delivery of the rendered report.
//!
//! Disabled or incomplete configuration is a quiet "not sent". SMTP failures
//! during a fully configured send are logged and also reported as not sent,
//! so the run still finishes with the report on disk.

use anyhow::{Context, Result};
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};

use crate::config::EmailConfig;

pub const REPORT_SUBJECT: &str = "Job Radar Daily Report";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Sent { to: String },
    Disabled,
    Incomplete,
    Failed { error: String },
}

impl DeliveryOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryOutcome::Sent { .. })
    }
}

pub struct EmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailSender {
    /// STARTTLS relay on the configured port; credentials only when user and pass are both set.
    pub fn from_config(cfg: &EmailConfig) -> Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(cfg.smtp_host.trim())
            .context("invalid smtp_host")?
            .port(cfg.smtp_port);
        if !cfg.smtp_user.is_empty() && !cfg.smtp_pass.is_empty() {
            builder = builder.credentials(Credentials::new(
                cfg.smtp_user.clone(),
                cfg.smtp_pass.clone(),
            ));
        }
        let mailer = builder.build();

        let from = cfg.from_email.trim().parse().context("invalid from_email")?;
        let to = cfg.to_email.trim().parse().context("invalid to_email")?;

        Ok(Self { mailer, from, to })
    }

    pub fn recipient(&self) -> String {
        self.to.to_string()
    }

    pub async fn send_html(&self, subject: &str, html: &str) -> Result<()> {
        let msg = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(header::ContentType::TEXT_HTML)
            .body(html.to_string())
            .context("build email")?;

        self.mailer.send(msg).await.context("send email")?;
        Ok(())
    }
}

/// Send the report if email is enabled and fully configured. Never errors.
pub async fn deliver_report(cfg: &EmailConfig, html: &str) -> DeliveryOutcome {
    if !cfg.enabled {
        tracing::debug!("email disabled");
        return DeliveryOutcome::Disabled;
    }
    if !cfg.is_complete() {
        tracing::warn!("email not fully configured; skipping send");
        return DeliveryOutcome::Incomplete;
    }

    let sender = match EmailSender::from_config(cfg) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = ?e, "email setup failed");
            return DeliveryOutcome::Failed {
                error: format!("{e:#}"),
            };
        }
    };

    match sender.send_html(REPORT_SUBJECT, html).await {
        Ok(()) => {
            let to = sender.recipient();
            tracing::info!(%to, "report emailed");
            DeliveryOutcome::Sent { to }
        }
        Err(e) => {
            tracing::warn!(error = ?e, "email send failed");
            DeliveryOutcome::Failed {
                error: format!("{e:#}"),
            }
        }
    }
}
