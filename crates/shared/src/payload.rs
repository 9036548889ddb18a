use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

pub const NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 100;
pub const MESSAGE_MAX_LEN: usize = 500;

pub static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Syntactic `local@domain.tld` check used by the contact form.
pub fn is_valid_email(email: &str) -> bool {
    RE_EMAIL.is_match(email)
}

/// A contact form submission, as sent to `POST /api/contact`.
#[derive(Validate, Serialize, Deserialize, Default, Clone, Debug, PartialEq, Eq)]
pub struct ContactPayload {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100), regex(path = *RE_EMAIL, message = "Please provide a valid email!"))]
    pub email: String,
    #[validate(length(min = 1, max = 500))]
    pub message: String,
}
