use anyhow::Result;
use folio_contact::{
    BlockReason, ConsoleNotifier, ContactForm, EMAIL_ERROR, Field, HttpContactClient,
    REQUIRED_ERROR, SubmitOutcome,
};

pub async fn send(endpoint: &str, name: &str, email: &str, message: &str) -> Result<()> {
    let client = HttpContactClient::new(endpoint);
    tracing::info!(endpoint = %client.endpoint(), "Submitting contact form");

    let mut form = ContactForm::new(client, ConsoleNotifier);

    for (field, value) in [
        (Field::Name, name),
        (Field::Email, email),
        (Field::Message, message),
    ] {
        form.set(field, value);
        form.blur(field);
    }

    match form.submit().await {
        SubmitOutcome::Sent => Ok(()),
        SubmitOutcome::Blocked(BlockReason::Required) => anyhow::bail!(REQUIRED_ERROR),
        SubmitOutcome::Blocked(BlockReason::InvalidEmail) => anyhow::bail!(EMAIL_ERROR),
        SubmitOutcome::Failed(message) => anyhow::bail!(message),
    }
}
