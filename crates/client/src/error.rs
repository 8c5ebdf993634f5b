use codenote_core::error::CoreError;

/// Errors surfaced by note stores and the views built on them.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Local input was rejected before reaching a store (malformed code,
    /// invalid owner id).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No note exists under the code.
    #[error("Note with code {code} not found")]
    NotFound { code: String },

    /// The store rejected a write (stale compare-and-swap, no free code).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout, body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with an unexpected non-2xx status.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl ClientError {
    /// Whether the error means the note does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }
}
