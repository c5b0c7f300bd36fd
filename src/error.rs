use thiserror::Error;

/// Failures surfaced by the league client.
///
/// None of these are recovered locally; they propagate to whoever owns the
/// client (the trigger maps them onto HTTP statuses).
#[derive(Debug, Error)]
pub enum MflError {
    /// Login was rejected or the login response carried no session token.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Network failure or non-success HTTP status from the league host.
    #[error("transport error: {message}")]
    Transport { message: String, timeout: bool },

    /// The response decoded but lacked an expected key, or did not decode.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Live scoring referenced a franchise or player the cached views do not know.
    #[error("lookup failed: {0}")]
    Lookup(String),
}

pub type Result<T> = std::result::Result<T, MflError>;

impl MflError {
    pub fn transport(message: impl Into<String>) -> Self {
        MflError::Transport {
            message: message.into(),
            timeout: false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, MflError::Transport { timeout: true, .. })
    }
}

impl From<reqwest::Error> for MflError {
    fn from(err: reqwest::Error) -> Self {
        let timeout = err.is_timeout();
        // URLs carry the login password in their query string
        MflError::Transport {
            message: err.without_url().to_string(),
            timeout,
        }
    }
}
