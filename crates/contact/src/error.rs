#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("contact request rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("contact request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SubmitError {
    /// Message the server put in the response body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            SubmitError::Rejected { message, .. } => message.as_deref(),
            SubmitError::Transport(_) => None,
        }
    }
}
