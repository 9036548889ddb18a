use strum::{AsRefStr, Display};

use crate::{ContactMail, ValidSecrets};

#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum Channel {
    Telegram,
    Email,
}

/// Chat notification transport.
///
/// `Ok(false)` means the remote API answered but did not acknowledge the
/// message.
#[async_trait::async_trait]
pub trait ChatChannel: Send + Sync {
    async fn send_message(&self, secrets: &ValidSecrets, text: &str) -> anyhow::Result<bool>;
}

/// Mail notification transport.
#[async_trait::async_trait]
pub trait MailChannel: Send + Sync {
    async fn send_mail(&self, secrets: &ValidSecrets, mail: &ContactMail) -> anyhow::Result<()>;
}
