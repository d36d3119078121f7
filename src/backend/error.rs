//! Errors raised while talking to the registration backend

use thiserror::Error;

/// Failure of one backend request
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl BackendError {
    pub(crate) fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}
