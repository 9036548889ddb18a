use askama::Template;
use folio_shared::ContactPayload;

use crate::{mail_subject, plain_text};

#[derive(Template)]
#[template(path = "contact.html")]
struct ContactHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

/// A fully rendered notification email, ready for a [`crate::MailChannel`].
#[derive(Debug, Clone)]
pub struct ContactMail {
    pub subject: String,
    pub reply_to: String,
    pub plain: String,
    pub html: String,
}

impl ContactMail {
    pub fn render(payload: &ContactPayload) -> askama::Result<Self> {
        let html = ContactHtmlTemplate {
            name: &payload.name,
            email: &payload.email,
            message: &payload.message,
        }
        .render()?;

        Ok(Self {
            subject: mail_subject(payload),
            reply_to: payload.email.to_owned(),
            plain: plain_text(payload),
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_embeds_fields() {
        let payload = ContactPayload {
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            message: "Hello".to_owned(),
        };

        let mail = ContactMail::render(&payload).unwrap();
        assert_eq!(mail.reply_to, "alice@example.com");
        assert!(mail.plain.contains("New message from Alice"));
        assert!(mail.subject.contains("Alice"));
        assert!(mail.html.contains("<strong>Name:</strong> Alice"));
        assert!(mail.html.contains("alice@example.com"));
        assert!(mail.html.contains("Hello"));
    }

    #[test]
    fn test_render_escapes_markup() {
        let payload = ContactPayload {
            name: "<b>Mallory</b>".to_owned(),
            email: "m@example.com".to_owned(),
            message: "<script>alert(1)</script>".to_owned(),
        };

        let mail = ContactMail::render(&payload).unwrap();
        assert!(!mail.html.contains("<script>"));
        assert!(!mail.html.contains("<b>Mallory</b>"));
        assert!(mail.html.contains("alert(1)"));
    }

    #[test]
    fn test_plain_part_keeps_submitter_text_verbatim() {
        let payload = ContactPayload {
            name: "snake_case".to_owned(),
            email: "john_doe@example.com".to_owned(),
            message: "*hi*".to_owned(),
        };

        let mail = ContactMail::render(&payload).unwrap();
        assert!(!mail.plain.contains('\\'));
        assert!(mail.plain.contains("Email: john_doe@example.com"));
        assert!(mail.plain.ends_with("*hi*"));
    }
}
