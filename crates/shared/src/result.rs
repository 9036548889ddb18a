use serde::{Deserialize, Serialize};

pub const SERVER_ERROR_MESSAGE: &str = "Server error occurred.";

/// Body returned by `POST /api/contact`.
///
/// The HTTP status is fully determined by `success`: 200 when every channel
/// delivered, 500 otherwise.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DispatchResult {
    pub success: bool,
    pub message: String,
}

impl DispatchResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }

    /// Generic failure that leaks no internal detail.
    pub fn server_error() -> Self {
        Self::failure(SERVER_ERROR_MESSAGE)
    }

    pub fn status_code(&self) -> u16 {
        if self.success { 200 } else { 500 }
    }
}
