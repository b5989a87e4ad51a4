use thiserror::Error;

/// Top-level error type for the `sitewatch-api` crate.
///
/// Covers every failure mode of the GraphQL surface: transport, HTTP
/// status, GraphQL `errors` envelopes, and payload decoding.
/// `sitewatch-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-2xx response from the service.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── GraphQL ─────────────────────────────────────────────────────
    /// The service answered with a non-empty `errors` array.
    #[error("{message}")]
    GraphQl {
        message: String,
        /// Every message in the `errors` array, in server order.
        all: Vec<String>,
    },

    /// The `data` object was absent or did not carry the requested field.
    #[error("Response for `{operation}` carried no data")]
    MissingData { operation: &'static str },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
