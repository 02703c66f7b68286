//! Error types shared by the feed, settings and start-up code.
use thiserror::Error;

/// Failure modes of a single quote fetch.
///
/// Every variant is recoverable: the poller logs it, the UI shows it, and the
/// next tick tries again. Transport errors are flattened to strings so the
/// value can be cloned into UI events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Provider answered with a rate-limit notice (`"Note"` / `"Information"`).
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Provider answered with an `"Error Message"` payload.
    #[error("provider error: {0}")]
    Provider(String),

    /// Request never produced a response (DNS, connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(String),

    /// Response arrived with a non-success status code.
    #[error("HTTP GET request failed with status {0}")]
    HttpStatus(u16),

    /// Body was not JSON, or JSON of an unrecognised shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // the request URL carries the API key
        let err = err.without_url();
        if err.is_timeout() {
            FetchError::Transport(format!("timed out: {err}"))
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

/// Start-up and configuration errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid setting {key}: {detail}")]
    Setting { key: String, detail: String },

    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("poller thread panicked")]
    PollerPanicked,
}

/// Crate-wide `Result` alias defaulting to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_become_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(FetchError::from(err), FetchError::Malformed(_)));
    }

    #[test]
    fn status_error_message_mentions_code() {
        assert_eq!(
            FetchError::HttpStatus(503).to_string(),
            "HTTP GET request failed with status 503"
        );
    }
}
