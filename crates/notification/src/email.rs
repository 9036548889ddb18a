//! Email notification service using lettre

use std::sync::Mutex;

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use serde::Deserialize;

use crate::{ContactMail, MailChannel, ValidSecrets};

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_tls: bool,
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_owned(),
            smtp_port: 587,
            smtp_tls: true,
            from_name: "Portfolio Contact".to_owned(),
        }
    }
}

struct CachedMailer {
    username: String,
    password: String,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

/// Sends contact notifications to the account owner's own inbox.
///
/// The SMTP transport is built on first use and shared by every request; it
/// is rebuilt only when the credentials handed in for a request change.
pub struct EmailService {
    config: EmailConfig,
    cached: Mutex<Option<CachedMailer>>,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            cached: Mutex::new(None),
        }
    }

    fn mailer(&self, secrets: &ValidSecrets) -> anyhow::Result<AsyncSmtpTransport<Tokio1Executor>> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| anyhow::anyhow!("smtp transport cache poisoned"))?;

        if let Some(current) = cached.as_ref() {
            if current.username == secrets.email_address()
                && current.password == secrets.gmail_passkey()
            {
                return Ok(current.mailer.clone());
            }
        }

        let creds = Credentials::new(
            secrets.email_address().to_owned(),
            secrets.gmail_passkey().to_owned(),
        );

        let mailer = if self.config.smtp_tls {
            tracing::info!(
                smtp_host = %self.config.smtp_host,
                smtp_port = self.config.smtp_port,
                "Building SMTP transport with STARTTLS"
            );

            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        } else {
            tracing::info!(
                smtp_host = %self.config.smtp_host,
                smtp_port = self.config.smtp_port,
                "Building SMTP transport without TLS (e.g., MailDev)"
            );

            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        *cached = Some(CachedMailer {
            username: secrets.email_address().to_owned(),
            password: secrets.gmail_passkey().to_owned(),
            mailer: mailer.clone(),
        });

        Ok(mailer)
    }

    pub fn build_message(&self, secrets: &ValidSecrets, mail: &ContactMail) -> anyhow::Result<Message> {
        let account: Mailbox = secrets.email_address().parse()?;
        let from = Mailbox::new(Some(self.config.from_name.to_owned()), account.email.clone());

        let mut builder = Message::builder()
            .from(from)
            .to(account)
            .subject(&mail.subject);

        // The submitter's address is free text; an unusable one only costs the
        // Reply-To header.
        match mail.reply_to.parse::<Mailbox>() {
            Ok(reply_to) => builder = builder.reply_to(reply_to),
            Err(err) => tracing::warn!(
                reply_to = %mail.reply_to,
                error = %err,
                "Sending without Reply-To"
            ),
        }

        let message = builder.multipart(MultiPart::alternative_plain_html(
            mail.plain.to_owned(),
            mail.html.to_owned(),
        ))?;

        Ok(message)
    }
}

#[async_trait::async_trait]
impl MailChannel for EmailService {
    #[tracing::instrument(skip_all, fields(reply_to = %mail.reply_to))]
    async fn send_mail(&self, secrets: &ValidSecrets, mail: &ContactMail) -> anyhow::Result<()> {
        let message = self.build_message(secrets, mail)?;
        let mailer = self.mailer(secrets)?;

        tracing::info!("Sending email");

        mailer.send(message).await?;

        Ok(())
    }
}
