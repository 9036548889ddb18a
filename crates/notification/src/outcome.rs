use folio_shared::DispatchResult;

pub const DELIVERED_MESSAGE: &str = "✅ Message and email sent successfully!";
pub const BOTH_FAILED_MESSAGE: &str = "❌ Both Telegram and Email failed.";
pub const CHAT_FAILED_MESSAGE: &str = "⚠️ Email sent, but failed to send Telegram message.";
pub const EMAIL_FAILED_MESSAGE: &str = "⚠️ Telegram sent, but failed to send Email.";
pub const CONFIGURATION_MISSING_MESSAGE: &str = "❌ One or more environment variables are missing.";

/// Per-channel delivery results of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub chat: bool,
    pub email: bool,
}

impl Outcome {
    /// Anything short of both channels delivering is a failure.
    pub fn into_result(self) -> DispatchResult {
        match (self.chat, self.email) {
            (true, true) => DispatchResult::success(DELIVERED_MESSAGE),
            (false, false) => DispatchResult::failure(BOTH_FAILED_MESSAGE),
            (false, true) => DispatchResult::failure(CHAT_FAILED_MESSAGE),
            (true, false) => DispatchResult::failure(EMAIL_FAILED_MESSAGE),
        }
    }
}
