use folio_shared::ContactPayload;

/// Characters the Bot API treats as entity delimiters in legacy Markdown.
const MARKDOWN_SPECIAL: [char; 4] = ['_', '*', '`', '['];

/// Chat message body, in the Bot API's legacy Markdown.
pub fn notification_text(payload: &ContactPayload) -> String {
    format!(
        "📬 {}\n\n📧 Email: {}\n📝 Message:\n{}",
        bold(&format!("New message from {}", payload.name)),
        escape_markdown(&payload.email),
        escape_markdown(&payload.message),
    )
}

/// Plain-text part of the notification email. Same layout, no markup.
pub fn plain_text(payload: &ContactPayload) -> String {
    format!(
        "📬 New message from {}\n\n📧 Email: {}\n📝 Message:\n{}",
        payload.name, payload.email, payload.message,
    )
}

pub fn mail_subject(payload: &ContactPayload) -> String {
    format!("📩 New Message From {}", payload.name)
}

/// Wraps `value` in a bold entity. Escapes are not allowed inside an entity,
/// so a literal `*` closes it, is escaped, and a new entity opens after it.
pub fn bold(value: &str) -> String {
    value
        .split('*')
        .map(|part| {
            if part.is_empty() {
                String::new()
            } else {
                format!("*{part}*")
            }
        })
        .collect::<Vec<_>>()
        .join(r"\*")
}

/// Escapes entity delimiters in text outside any entity.
pub fn escape_markdown(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if MARKDOWN_SPECIAL.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
