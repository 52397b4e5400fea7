//! HTTP adapter for the OpenAI Files and Responses APIs.
//!
//! This crate provides the provider-side mechanics used for document
//! analysis: uploading a document into provider storage, requesting a
//! schema-constrained response against it, chaining follow-up turns via
//! `previous_response_id`, and consuming streamed output incrementally.

/// Error types returned by adapter operations.
pub mod error;
/// Request-body construction for the Responses API.
pub mod request;
/// SSE parsing for streamed responses.
pub mod stream;
/// Wire types for files, responses, and stream events.
pub mod types;

pub use error::OpenAiError;
pub use request::{ResponseInput, ResponseRequest, SchemaFormat};
pub use stream::ResponseStream;
pub use types::*;

use bytes::Bytes;
use reqwest::header;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// High-level client for the OpenAI API.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new client for the given API key.
    ///
    /// # Errors
    ///
    /// Returns `OpenAiError::Config` when the key is empty. The check
    /// runs here so misconfiguration fails before any network call.
    pub fn new(api_key: impl Into<String>) -> Result<Self, OpenAiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(OpenAiError::Config("API key must not be empty".to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Overrides the API base URL (proxies, compatible gateways).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Uploads a document into provider storage with purpose `user_data`.
    ///
    /// The stored file consumes provider quota until deleted.
    ///
    /// # Errors
    ///
    /// `PayloadTooLarge` when the API rejects the upload by size,
    /// `Transport` on network failure, `Api` on other rejections.
    pub async fn upload_file(
        &self,
        bytes: Bytes,
        filename: &str,
    ) -> Result<FileObject, OpenAiError> {
        let size = bytes.len() as u64;
        let part = reqwest::multipart::Part::stream(reqwest::Body::from(bytes))
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new()
            .text("purpose", "user_data")
            .part("file", part);

        tracing::debug!(filename, size, "Uploading document to OpenAI");

        let response = self
            .http
            .post(format!("{}/files", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let response = Self::check_status(response, size).await?;
        let file: FileObject = response.json().await?;
        tracing::debug!(file_id = %file.id, "Upload complete");
        Ok(file)
    }

    /// Deletes a previously uploaded file.
    pub async fn delete_file(&self, file_id: &str) -> Result<FileDeleted, OpenAiError> {
        let response = self
            .http
            .delete(format!("{}/files/{file_id}", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let response = Self::check_status(response, 0).await?;
        Ok(response.json().await?)
    }

    /// Executes a Responses API call and waits for the full result.
    ///
    /// # Errors
    ///
    /// `Api` carries the HTTP status and provider message on rejection;
    /// a response that arrives with `status == "failed"` is also an
    /// `Api` error so callers never see a half-usable result.
    pub async fn create_response(
        &self,
        request: &ResponseRequest,
    ) -> Result<ResponseObject, OpenAiError> {
        let response = self
            .http
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request.to_body(false))
            .send()
            .await?;

        let response = Self::check_status(response, 0).await?;
        let object: ResponseObject = response.json().await?;

        if object.status == "failed" {
            let message = object
                .error
                .as_ref()
                .map_or("response failed without details", |e| e.message.as_str());
            return Err(OpenAiError::Api {
                status: 200,
                message: message.to_string(),
            });
        }

        Ok(object)
    }

    /// Executes a Responses API call with `stream: true`.
    ///
    /// Returns a finite stream of [`StreamEvent`]s; the caller pulls
    /// fragments cooperatively and may stop consuming at any point.
    pub async fn stream_response(
        &self,
        request: &ResponseRequest,
    ) -> Result<ResponseStream, OpenAiError> {
        let response = self
            .http
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&request.to_body(true))
            .send()
            .await?;

        let response = Self::check_status(response, 0).await?;
        Ok(ResponseStream::new(response.bytes_stream()))
    }

    /// Maps a non-success HTTP status into the adapter error taxonomy.
    async fn check_status(
        response: reqwest::Response,
        payload_bytes: u64,
    ) -> Result<reqwest::Response, OpenAiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::PAYLOAD_TOO_LARGE {
            return Err(OpenAiError::PayloadTooLarge {
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

        Err(OpenAiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
