use folio_shared::{
    ContactPayload, EMAIL_MAX_LEN, MESSAGE_MAX_LEN, NAME_MAX_LEN, is_valid_email,
};
use validator::Validate;

use crate::{ContactClient, Notifier};

pub const REQUIRED_ERROR: &str = "All fields are required!";
pub const EMAIL_ERROR: &str = "Please provide a valid email!";
pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const FALLBACK_ERROR: &str = "Something went wrong";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub email: bool,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    Required,
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stopped locally; the server was never contacted.
    Blocked(BlockReason),
    Sent,
    Failed(String),
}

/// State of the contact form between keystrokes and submits.
pub struct ContactForm<C, N> {
    input: ContactPayload,
    errors: FormErrors,
    loading: bool,
    client: C,
    notifier: N,
}

impl<C: ContactClient, N: Notifier> ContactForm<C, N> {
    pub fn new(client: C, notifier: N) -> Self {
        Self {
            input: ContactPayload::default(),
            errors: FormErrors::default(),
            loading: false,
            client,
            notifier,
        }
    }

    pub fn input(&self) -> &ContactPayload {
        &self.input
    }

    pub fn errors(&self) -> FormErrors {
        self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error lines to render under the form, in display order.
    pub fn error_messages(&self) -> Vec<&'static str> {
        let mut messages = Vec::new();
        if self.errors.email {
            messages.push(EMAIL_ERROR);
        }
        if self.errors.required {
            messages.push(REQUIRED_ERROR);
        }
        messages
    }

    /// Characters past the field's limit are dropped.
    pub fn set(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.input.name = truncate(value, NAME_MAX_LEN),
            Field::Email => self.input.email = truncate(value, EMAIL_MAX_LEN),
            Field::Message => self.input.message = truncate(value, MESSAGE_MAX_LEN),
        }
    }

    /// Leaving a field clears the required error once everything is filled,
    /// and re-checks the email format when leaving the email field.
    pub fn blur(&mut self, field: Field) {
        if self.all_filled() {
            self.errors.required = false;
        }

        if field == Field::Email {
            self.errors.email = !is_valid_email(&self.input.email);
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if let Err(reason) = self.check() {
            tracing::debug!(?reason, "Contact form submission blocked");
            return SubmitOutcome::Blocked(reason);
        }

        self.loading = true;
        let result = self.client.submit(&self.input).await;
        self.loading = false;

        match result {
            Ok(()) => {
                self.notifier.success(SUCCESS_MESSAGE);
                self.input = ContactPayload::default();
                SubmitOutcome::Sent
            }
            Err(err) => {
                tracing::error!(error = %err, "Contact form submission failed");
                let message = err.server_message().unwrap_or(FALLBACK_ERROR).to_owned();
                self.notifier.error(&message);
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn all_filled(&self) -> bool {
        !self.input.name.is_empty() && !self.input.email.is_empty() && !self.input.message.is_empty()
    }

    fn check(&mut self) -> Result<(), BlockReason> {
        if let Err(errors) = self.input.validate() {
            let required = errors
                .field_errors()
                .values()
                .flat_map(|errs| errs.iter())
                .any(|err| err.code == "length");

            if required {
                self.errors.required = true;
                return Err(BlockReason::Required);
            }

            self.errors.email = true;
            return Err(BlockReason::InvalidEmail);
        }

        self.errors = FormErrors::default();
        Ok(())
    }
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
