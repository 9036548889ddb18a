use std::{future::Future, sync::Arc, time::Duration};

use folio_shared::{ContactPayload, DispatchResult};

use crate::{
    CONFIGURATION_MISSING_MESSAGE, Channel, ChatChannel, ContactMail, DispatchError, MailChannel,
    Outcome, SecretSource, ValidSecrets, notification_text,
};

/// Delivers a contact submission over chat and email at the same time and
/// folds both outcomes into one [`DispatchResult`].
#[derive(Clone)]
pub struct Dispatcher {
    chat: Arc<dyn ChatChannel>,
    mail: Arc<dyn MailChannel>,
    secrets: Arc<dyn SecretSource>,
    timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(
        chat: Arc<dyn ChatChannel>,
        mail: Arc<dyn MailChannel>,
        secrets: Arc<dyn SecretSource>,
    ) -> Self {
        Self {
            chat,
            mail,
            secrets,
            timeout: None,
        }
    }

    /// Bound each channel independently; `None` waits for the transport.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[tracing::instrument(skip_all, fields(name = %payload.name))]
    pub async fn dispatch(&self, payload: &ContactPayload) -> DispatchResult {
        let secrets = match self.secrets.load().validate() {
            Ok(secrets) => secrets,
            Err(err) => {
                tracing::error!(error = %err, "Refusing to dispatch contact message");
                return DispatchResult::failure(CONFIGURATION_MISSING_MESSAGE);
            }
        };

        let text = notification_text(payload);

        let (chat, email) = futures::future::join(
            self.deliver_chat(&secrets, &text),
            self.deliver_mail(&secrets, payload),
        )
        .await;

        tracing::info!(chat, email, "Contact message dispatched");

        Outcome { chat, email }.into_result()
    }

    async fn deliver_chat(&self, secrets: &ValidSecrets, text: &str) -> bool {
        let channel = Channel::Telegram;

        match self
            .bounded(channel, self.chat.send_message(secrets, text))
            .await
        {
            Ok(acknowledged) => acknowledged,
            Err(err) => {
                tracing::error!(%channel, error = %format!("{err:#}"), "Delivery failed");
                false
            }
        }
    }

    async fn deliver_mail(&self, secrets: &ValidSecrets, payload: &ContactPayload) -> bool {
        let channel = Channel::Email;
        let send = async {
            let mail = ContactMail::render(payload)?;
            self.mail.send_mail(secrets, &mail).await
        };

        match self.bounded(channel, send).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(%channel, error = %format!("{err:#}"), "Delivery failed");
                false
            }
        }
    }

    async fn bounded<T>(
        &self,
        channel: Channel,
        fut: impl Future<Output = anyhow::Result<T>>,
    ) -> anyhow::Result<T> {
        let Some(after) = self.timeout else {
            return fut.await;
        };

        match tokio::time::timeout(after, fut).await {
            Ok(result) => result,
            Err(_) => Err(DispatchError::Timeout { channel, after }.into()),
        }
    }
}
