//! Fetch boundary contract.
//!
//! The overlay client never performs network I/O itself; an adapter fetches
//! the published index and reports the outcome through
//! [`SearchClient::fetch_resolved`](crate::client::SearchClient::fetch_resolved).
//! All failure kinds are treated uniformly by the client: the overlay enters
//! the error phase with a fixed user-visible hint.

use thiserror::Error;

/// Errors surfaced by an index fetcher implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    Http(u16),

    /// Response body was not a valid index document.
    #[error("invalid index payload: {0}")]
    Parse(String),

    /// The request did not complete within the configured deadline.
    #[error("index request timed out after {0} ms")]
    TimedOut(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            FetchError::Http(404).to_string(),
            "unexpected HTTP status 404"
        );
        assert_eq!(
            FetchError::TimedOut(8000).to_string(),
            "index request timed out after 8000 ms"
        );
        assert!(
            FetchError::Parse("expected value".to_string())
                .to_string()
                .contains("invalid index payload")
        );
    }
}
