//! Error types for `zeroshift-content`.
//!
//! Upstream failures carry the HTTP status so the web tier can log what the
//! CMS actually said before falling back. Error messages never include the
//! API credential.

use reqwest::StatusCode;

/// Errors from fetching content out of the CMS.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("content request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The CMS answered with a non-2xx status.
    #[error("upstream content API returned {status}")]
    Upstream { status: StatusCode },

    /// The response body was not the expected `{ results: [...] }` envelope.
    #[error("failed to decode content response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ContentError {
    /// Whether a retry has any chance of succeeding.
    ///
    /// Transport errors and 5xx/429 responses are transient; other client
    /// errors (bad credential, unknown model) will not fix themselves.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Upstream { status } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Decode(_) => false,
        }
    }
}
