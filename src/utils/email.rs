//! Outbound email over SMTP.
//!
//! Sending is best-effort everywhere it is used: the invitation workflow has
//! already committed by the time the email goes out, so failures are logged
//! by the caller, never propagated to the member-facing response. With
//! `SMTP_ENABLED` off (the default outside production) sends are skipped.

use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::instrument;

use crate::config::email::EmailConfig;
use crate::utils::errors::AppError;

pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(self))]
    pub async fn send_invitation_email(
        &self,
        to_email: &str,
        to_name: &str,
        company_name: &str,
    ) -> Result<(), AppError> {
        let login_link = format!("{}/login", self.config.frontend_url);
        let subject = format!("You've joined {} on Dealdesk", company_name);

        let text = format!(
            "Hi {to_name},\n\n\
             You've been added to {company_name} on Dealdesk.\n\n\
             Log in with your email address and the password you were given:\n\
             {login_link}\n\n\
             The Dealdesk Team",
        );
        let html = invitation_html(to_name, company_name, &login_link);

        self.deliver(to_email, &subject, text, html).await
    }

    async fn deliver(
        &self,
        to_email: &str,
        subject: &str,
        text: String,
        html: String,
    ) -> Result<(), AppError> {
        if !self.config.enabled {
            tracing::debug!(to = to_email, subject, "SMTP disabled, skipping email");
            return Ok(());
        }

        let message = Message::builder()
            .from(
                format!("{} <{}>", self.config.from_name, self.config.from_email)
                    .parse()
                    .map_err(|e| AppError::internal_error(format!("Invalid from address: {e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal_error(format!("Invalid to address: {e}")))?)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(text, html))
            .map_err(|e| AppError::internal_error(format!("Failed to build email: {e}")))?;

        self.transport()?
            .send(message)
            .await
            .map_err(|e| AppError::internal_error(format!("Failed to send email: {e}")))?;

        Ok(())
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, AppError> {
        // No credentials means a local relay (e.g. mailpit in development),
        // reached without TLS.
        if self.config.smtp_username.is_empty() {
            return Ok(
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.config.smtp_host)
                    .port(self.config.smtp_port)
                    .build(),
            );
        }

        let credentials = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );
        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
                .map_err(|e| AppError::internal_error(format!("Failed to create SMTP relay: {e}")))?
                .port(self.config.smtp_port)
                .credentials(credentials)
                .build(),
        )
    }
}

fn invitation_html(name: &str, company_name: &str, login_link: &str) -> String {
    format!(
        r#"<html>
<body style="margin:0;background:#f4f5f7;font-family:Arial,Helvetica,sans-serif;color:#1f2933;">
  <div style="max-width:560px;margin:32px auto;background:#ffffff;border-radius:8px;overflow:hidden;">
    <div style="background:#0f766e;color:#ffffff;padding:24px 32px;font-size:22px;font-weight:bold;">Dealdesk</div>
    <div style="padding:32px;">
      <p>Hi <strong>{name}</strong>,</p>
      <p>You've been added to <strong>{company_name}</strong>. Log in with your
      email address and the password you were given:</p>
      <p style="text-align:center;margin:28px 0;">
        <a href="{login_link}" style="background:#0f766e;color:#ffffff;padding:12px 36px;border-radius:6px;text-decoration:none;font-weight:bold;">Log in</a>
      </p>
    </div>
    <div style="padding:16px 32px;background:#f8f9fa;color:#9aa5b1;font-size:12px;">
      This is an automated email from Dealdesk. Please do not reply.
    </div>
  </div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invitation_html_interpolates_fields() {
        let html = invitation_html("Ada", "Acme Realty", "https://app.dealdesk.io/login");
        assert!(html.contains("Ada"));
        assert!(html.contains("Acme Realty"));
        assert!(html.contains(r#"href="https://app.dealdesk.io/login""#));
    }

    #[tokio::test]
    async fn test_disabled_config_skips_send() {
        let service = EmailService::new(EmailConfig {
            enabled: false,
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "noreply@dealdesk.test".to_string(),
            from_name: "Dealdesk".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
        });

        service
            .send_invitation_email("new@acme.test", "New Member", "Acme")
            .await
            .unwrap();
    }
}
