//! HTTP adapter for the Gemini generateContent and Files APIs.
//!
//! Documents below [`INLINE_SIZE_LIMIT`] travel base64-inline with the
//! request; larger ones are stored through the Files API first and
//! referenced by URI. That policy decision belongs to the caller; this
//! crate exposes both paths plus the threshold constant.

/// Error types returned by adapter operations.
pub mod error;
/// Wire types for requests, responses, and stored files.
pub mod types;

pub use error::GeminiError;
pub use types::*;

use bytes::Bytes;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Largest payload the API accepts inline in a request. At or above
/// this size the Files API upload path must be used.
pub const INLINE_SIZE_LIMIT: u64 = 20 * 1024 * 1024;

/// Returns `true` when a document of `len` bytes may travel inline.
#[must_use]
pub const fn fits_inline(len: u64) -> bool {
    len < INLINE_SIZE_LIMIT
}

/// High-level client for the Gemini API.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new client for the given API key.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::Config` when the key is empty. The check
    /// runs here so misconfiguration fails before any network call.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::Config("API key must not be empty".to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Stores a document through the Files API.
    ///
    /// # Errors
    ///
    /// `PayloadTooLarge` when the API rejects the upload by size,
    /// `Transport` on network failure, `Api` on other rejections.
    pub async fn upload_file(
        &self,
        bytes: Bytes,
        display_name: &str,
        mime_type: &str,
    ) -> Result<FileMetadata, GeminiError> {
        let size = bytes.len() as u64;
        let metadata = serde_json::json!({"file": {"display_name": display_name}});
        let metadata_part = reqwest::multipart::Part::text(metadata.to_string())
            .mime_str("application/json")?;
        let data_part = reqwest::multipart::Part::stream(reqwest::Body::from(bytes))
            .file_name(display_name.to_string())
            .mime_str(mime_type)?;
        let form = reqwest::multipart::Form::new()
            .part("metadata", metadata_part)
            .part("file", data_part);

        tracing::debug!(display_name, size, "Uploading document to Gemini Files API");

        let response = self
            .http
            .post(format!(
                "{}/upload/v1beta/files?uploadType=multipart&key={}",
                self.base_url, self.api_key
            ))
            .multipart(form)
            .send()
            .await?;

        let response = Self::check_status(response, size).await?;
        let uploaded: UploadResponse = response.json().await?;
        tracing::debug!(name = %uploaded.file.name, "Upload complete");
        Ok(uploaded.file)
    }

    /// Deletes a stored file by its resource name (`files/...`).
    pub async fn delete_file(&self, name: &str) -> Result<(), GeminiError> {
        let response = self
            .http
            .delete(format!(
                "{}/v1beta/{name}?key={}",
                self.base_url, self.api_key
            ))
            .send()
            .await?;

        Self::check_status(response, 0).await?;
        Ok(())
    }

    /// Runs a generateContent call against the given model.
    ///
    /// # Errors
    ///
    /// `NoCandidate` when the model returned no usable output (for
    /// example a safety block); `Api` / `Transport` for request-level
    /// failures.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let response = self
            .http
            .post(format!(
                "{}/v1beta/models/{model}:generateContent?key={}",
                self.base_url, self.api_key
            ))
            .json(request)
            .send()
            .await?;

        let response = Self::check_status(response, 0).await?;
        let parsed: GenerateContentResponse = response.json().await?;

        if parsed.candidates.is_empty() {
            return Err(GeminiError::NoCandidate(
                "response carried no candidates".to_string(),
            ));
        }
        Ok(parsed)
    }

    /// Maps a non-success HTTP status into the adapter error taxonomy.
    async fn check_status(
        response: reqwest::Response,
        payload_bytes: u64,
    ) -> Result<reqwest::Response, GeminiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::PAYLOAD_TOO_LARGE {
            return Err(GeminiError::PayloadTooLarge {
                bytes: payload_bytes,
            });
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|body| {
                serde_json::from_str::<serde_json::Value>(&body)
                    .ok()
                    .and_then(|v| {
                        v.pointer("/error/message")
                            .and_then(serde_json::Value::as_str)
                            .map(String::from)
                    })
                    .or(Some(body))
            })
            .unwrap_or_default();

        Err(GeminiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_threshold_is_exclusive_at_the_boundary() {
        assert!(fits_inline(0));
        assert!(fits_inline(INLINE_SIZE_LIMIT - 1));
        assert!(!fits_inline(INLINE_SIZE_LIMIT), "20 MiB exactly must upload");
        assert!(!fits_inline(INLINE_SIZE_LIMIT + 1));
    }

    #[test]
    fn empty_api_key_is_rejected_before_any_call() {
        assert!(matches!(
            GeminiClient::new("  "),
            Err(GeminiError::Config(_))
        ));
    }
}
