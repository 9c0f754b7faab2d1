/// Email delivery over SMTP via lettre. Delivery failures surface to the
/// caller as `ApiError::Email`; nothing is retried here.
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::Config;
use crate::error::{ApiError, Result};

#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    frontend_url: String,
}

impl Mailer {
    pub fn new(config: &Config) -> Result<Self> {
        let transport = if config.smtp_username.is_empty() {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            );
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        let from = config
            .from_email
            .parse::<Mailbox>()
            .map_err(|e| ApiError::Internal(format!("invalid FROM_EMAIL: {e}")))?;

        Ok(Mailer {
            transport,
            from,
            frontend_url: config.frontend_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn send(&self, to: &str, subject: &str, html: String) -> Result<()> {
        let to = to
            .parse::<Mailbox>()
            .map_err(|e| ApiError::Email(format!("invalid recipient address: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html)?;

        self.transport.send(message).await?;
        Ok(())
    }

    pub async fn send_verification_email(&self, to: &str, token: &str) -> Result<()> {
        let link = format!(
            "{}/verify-email?email={}&token={}",
            self.frontend_url,
            urlencoding::encode(to),
            token
        );

        let html = format!(
            "<p>Welcome! Confirm your account:</p><a href=\"{link}\">Verify email</a>"
        );

        self.send(to, "Verify your email", html).await
    }

    pub async fn send_password_reset_email(&self, to: &str, token: &str) -> Result<()> {
        let link = format!(
            "{}/reset-password?email={}&token={}",
            self.frontend_url,
            urlencoding::encode(to),
            token
        );

        let html = format!("<p>Use this link:</p><a href=\"{link}\">Reset password</a>");

        self.send(to, "Reset your password", html).await
    }

    pub async fn send_otp_email(&self, to: &str, code: &str) -> Result<()> {
        let html = format!("<p>Your access code is: <strong>{code}</strong>. It expires in 10 minutes.</p>");

        self.send(to, "Your one-time code", html).await
    }
}
