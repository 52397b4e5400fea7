use thiserror::Error;

/// Errors returned by Gemini adapter operations.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Missing or invalid client configuration (empty API key, empty model).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Network-level failure before an API response was obtained.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success response from the API.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code of the failed request.
        status: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The API rejected the upload because the payload is too large.
    #[error("Payload of {bytes} bytes rejected as too large")]
    PayloadTooLarge {
        /// Size of the rejected payload.
        bytes: u64,
    },

    /// The API response body could not be parsed.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The model produced no usable candidate (safety block, empty output).
    #[error("No candidate output: {0}")]
    NoCandidate(String),
}
