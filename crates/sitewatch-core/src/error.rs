// ── Core error types ──
//
// User-facing errors from sitewatch-core. Consumers never see GraphQL
// envelopes or JSON decode failures directly; the `From<sitewatch_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

use crate::model::DisplayState;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out")]
    Timeout,

    // ── Validation errors ────────────────────────────────────────────
    #[error("Website url is required")]
    EmptyUrl,

    #[error("Invalid email.")]
    InvalidEmail,

    #[error("Cannot {action} a website that is {state}")]
    InvalidTransition {
        state: DisplayState,
        action: &'static str,
    },

    #[error("A monitoring request is already pending for website {id}")]
    Busy { id: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Website not found: {id}")]
    WebsiteNotFound { id: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Operation rejected by backend: {message}")]
    Rejected { message: String },

    /// The result arrived after its website was deleted or its poll
    /// timer was superseded. Presentation drops these silently.
    #[error("Result for website {id} discarded")]
    Discarded { id: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("{message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Stale results that should never reach the user.
    pub fn is_discarded(&self) -> bool {
        matches!(self, Self::Discarded { .. })
    }

    /// Rejected locally before any remote call was made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyUrl | Self::InvalidEmail | Self::InvalidTransition { .. } | Self::Busy { .. }
        )
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sitewatch_api::Error> for CoreError {
    fn from(err: sitewatch_api::Error) -> Self {
        match err {
            sitewatch_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            sitewatch_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            sitewatch_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            sitewatch_api::Error::Http { status, body } => CoreError::Api {
                message: format!("HTTP {status}: {body}"),
                status: Some(status),
            },
            sitewatch_api::Error::GraphQl { message, .. } => CoreError::Api {
                message,
                status: None,
            },
            sitewatch_api::Error::MissingData { operation } => {
                CoreError::Internal(format!("Backend returned no data for {operation}"))
            }
            sitewatch_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
