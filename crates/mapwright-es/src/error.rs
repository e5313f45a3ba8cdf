//! Error types for the repository facade.

/// Errors surfaced by repository operations.
///
/// Per-request errors are returned to the immediate caller without retry or
/// suppression; schema errors are fatal at construction time and the
/// repository never becomes ready.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Schema derivation failed (unsupported field type, dangling analyzer).
    #[error("schema error: {0}")]
    Schema(#[from] mapwright_core::Error),

    /// Network-level failure talking to the engine.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A request or response body failed to (de)serialize.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The engine answered with a 4xx status; the request was malformed.
    #[error("engine rejected request (HTTP {status}): {body}")]
    EngineClient {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the engine.
        body: String,
    },

    /// The engine answered with a 5xx status.
    #[error("engine failure (HTTP {status}): {body}")]
    EngineServer {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the engine.
        body: String,
    },

    /// A single-result lookup matched nothing. Expected and recoverable,
    /// unlike the transport and engine variants.
    #[error("no document matched {field}={value}")]
    NotFound {
        /// The field the lookup matched on.
        field: String,
        /// The value that matched nothing.
        value: String,
    },
}

/// Convenience `Result` type alias for repository operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether an external caller may reasonably retry the operation.
    ///
    /// This layer itself never retries; 5xx and transport failures are
    /// transient from the engine's point of view, everything else is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) | Error::EngineServer { .. } => true,
            Error::Schema(_)
            | Error::Serialization(_)
            | Error::EngineClient { .. }
            | Error::NotFound { .. } => false,
        }
    }

    /// Creates a `NotFound` for a single-result lookup.
    pub fn not_found<F, V>(field: F, value: V) -> Self
    where
        F: Into<String>,
        V: Into<String>,
    {
        Error::NotFound {
            field: field.into(),
            value: value.into(),
        }
    }
}
