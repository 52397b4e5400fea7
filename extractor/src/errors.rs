use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the extraction and conversation pipeline.
///
/// Every failure carries enough context (operation, underlying cause)
/// for the caller to decide between retry and abort; the pipeline
/// itself never retries and never degrades into a partial success.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Missing credential or model identifier, caught before any
    /// network call is made.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The input document does not exist.
    #[error("Document not found: {0}")]
    NotFound(PathBuf),

    /// Network or authentication failure before a provider response
    /// was obtained.
    #[error("Transport error during {operation}: {message}")]
    Transport {
        /// The adapter operation that failed.
        operation: &'static str,
        /// Underlying cause.
        message: String,
    },

    /// Backend-side failure (rate limit, timeout, content policy,
    /// empty output).
    #[error("Provider error during {operation}: {message}")]
    Provider {
        /// The adapter operation that failed.
        operation: &'static str,
        /// Underlying cause.
        message: String,
    },

    /// The provider rejected the document by size under the current
    /// adapter policy.
    #[error("Document of {bytes} bytes exceeds the provider's size limit")]
    PayloadTooLarge {
        /// Size of the rejected document.
        bytes: u64,
    },

    /// Provider output could not be parsed into the extraction schema
    /// (malformed JSON, unknown enum literal, type mismatch). Never
    /// coerced into a best-guess partial result.
    #[error("Provider output does not conform to the extraction schema: {0}")]
    SchemaViolation(String),

    /// A conversation operation was attempted without a completed
    /// extraction to continue from, or after the session was closed.
    #[error("Conversation session is not ready for questions")]
    SessionNotReady,

    /// Local I/O failure while reading the input document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
