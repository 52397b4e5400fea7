//! Gemini backend, built on the generateContent and Files APIs.
//!
//! Small documents travel inline with the request (`Inline` handle, no
//! provider-side state); documents at or above the inline limit are
//! stored through the Files API first (`Managed` handle). Gemini has
//! no server-side conversation chaining, so the backend reports no
//! conversation support.

use async_trait::async_trait;

use mrx_gemini::{
    fits_inline, Content, GeminiClient, GeminiError, GenerateContentRequest, GenerationConfig,
    Part,
};

use crate::config::ProviderConfig;
use crate::errors::ExtractError;
use crate::provider::{
    Analysis, AnswerStream, ContinuationHandle, Document, DocumentHandle, ProviderAdapter,
    RemoteDocument,
};
use crate::schema::{descriptor::schema_descriptor, MiningReport};

const DOCUMENT_MIME: &str = "application/pdf";

/// [`ProviderAdapter`] implementation for Gemini.
pub struct GeminiAdapter {
    client: GeminiClient,
    model: String,
}

impl GeminiAdapter {
    /// Builds the adapter from validated configuration.
    ///
    /// # Errors
    ///
    /// `Configuration` when the underlying client rejects the key.
    pub fn new(config: &ProviderConfig) -> Result<Self, ExtractError> {
        let mut client =
            GeminiClient::new(&config.api_key).map_err(|e| classify("configure", e))?;
        if let Some(url) = &config.base_url {
            client = client.with_base_url(url);
        }
        Ok(Self {
            client,
            model: config.model.clone(),
        })
    }
}

/// Maps a client error into the pipeline taxonomy, tagged with the
/// operation that failed.
fn classify(operation: &'static str, err: GeminiError) -> ExtractError {
    match err {
        GeminiError::Config(message) => ExtractError::Configuration(message),
        GeminiError::Transport(e) => ExtractError::Transport {
            operation,
            message: e.to_string(),
        },
        GeminiError::Api { status, message } => ExtractError::Provider {
            operation,
            message: format!("HTTP {status}: {message}"),
        },
        GeminiError::PayloadTooLarge { bytes } => ExtractError::PayloadTooLarge { bytes },
        GeminiError::Parse(message) | GeminiError::NoCandidate(message) => {
            ExtractError::Provider { operation, message }
        }
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn submit_document(&self, document: &Document) -> Result<DocumentHandle, ExtractError> {
        if fits_inline(document.len()) {
            tracing::debug!(size = document.len(), "Document travels inline");
            return Ok(DocumentHandle::Inline(document.bytes.clone()));
        }

        let file = self
            .client
            .upload_file(document.bytes.clone(), &document.filename, DOCUMENT_MIME)
            .await
            .map_err(|e| classify("submit", e))?;
        Ok(DocumentHandle::Managed(RemoteDocument {
            id: file.name,
            uri: Some(file.uri),
        }))
    }

    async fn analyze(
        &self,
        handle: &DocumentHandle,
        prompt: &str,
    ) -> Result<Analysis, ExtractError> {
        let document_part = match handle {
            DocumentHandle::Inline(bytes) => Part::inline_bytes(bytes, DOCUMENT_MIME),
            DocumentHandle::Managed(remote) => {
                let uri = remote.uri.as_deref().ok_or(ExtractError::Provider {
                    operation: "analyze",
                    message: "stored document carries no reference URI".to_string(),
                })?;
                Part::file_uri(uri, DOCUMENT_MIME)
            }
        };

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![document_part, Part::text(prompt)],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema_descriptor::<MiningReport>()),
            }),
        };

        let response = self
            .client
            .generate_content(&self.model, &request)
            .await
            .map_err(|e| classify("analyze", e))?;

        let text = response.text().ok_or(ExtractError::Provider {
            operation: "analyze",
            message: "response carried no output text".to_string(),
        })?;

        let report: MiningReport = serde_json::from_str(&text)
            .map_err(|e| ExtractError::SchemaViolation(e.to_string()))?;

        Ok(Analysis {
            report,
            continuation: None,
        })
    }

    async fn release_document(&self, handle: &DocumentHandle) {
        let DocumentHandle::Managed(remote) = handle else {
            return;
        };
        if let Err(err) = self.client.delete_file(&remote.id).await {
            tracing::warn!(name = %remote.id, error = %err, "Failed to release stored document");
        } else {
            tracing::debug!(name = %remote.id, "Released stored document");
        }
    }

    async fn continue_conversation(
        &self,
        _handle: &ContinuationHandle,
        _question: &str,
    ) -> Result<AnswerStream, ExtractError> {
        Err(ExtractError::Provider {
            operation: "converse",
            message: "Gemini does not support conversation continuation".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn test_config(base_url: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            api_key: "test-key".to_string(),
            model: "gemini-2.5-flash".to_string(),
            base_url: base_url.map(String::from),
        }
    }

    #[test]
    fn adapter_reports_no_conversation_support() {
        let adapter = GeminiAdapter::new(&test_config(None)).unwrap();
        assert!(!adapter.supports_conversation());
        assert_eq!(adapter.name(), "gemini");
    }

    #[tokio::test]
    async fn small_document_becomes_an_inline_handle_without_network() {
        // No server is listening here; a network attempt would fail.
        let adapter = GeminiAdapter::new(&test_config(Some("http://127.0.0.1:1"))).unwrap();
        let document = Document {
            bytes: Bytes::from_static(b"%PDF-1.4 tiny"),
            filename: "report.pdf".to_string(),
        };

        let handle = adapter.submit_document(&document).await.unwrap();
        assert!(matches!(handle, DocumentHandle::Inline(_)));
    }

    #[tokio::test]
    async fn large_document_takes_the_upload_path() {
        let adapter = GeminiAdapter::new(&test_config(Some("http://127.0.0.1:1"))).unwrap();
        let document = Document {
            bytes: Bytes::from(vec![0u8; (mrx_gemini::INLINE_SIZE_LIMIT) as usize]),
            filename: "large.pdf".to_string(),
        };

        // The unreachable address proves an upload was attempted.
        let err = adapter.submit_document(&document).await.unwrap_err();
        assert!(matches!(err, ExtractError::Transport { operation: "submit", .. }));
    }

    #[tokio::test]
    async fn conversation_is_rejected() {
        let adapter = GeminiAdapter::new(&test_config(None)).unwrap();
        let result = adapter
            .continue_conversation(&ContinuationHandle::new("x"), "grade?")
            .await;
        let Err(err) = result else {
            panic!("conversation continuation must be rejected");
        };
        assert!(matches!(err, ExtractError::Provider { operation: "converse", .. }));
    }

    #[tokio::test]
    async fn managed_handle_without_uri_fails_analysis() {
        let adapter = GeminiAdapter::new(&test_config(None)).unwrap();
        let handle = DocumentHandle::Managed(RemoteDocument {
            id: "files/x".to_string(),
            uri: None,
        });
        let err = adapter.analyze(&handle, "extract").await.unwrap_err();
        assert!(matches!(err, ExtractError::Provider { operation: "analyze", .. }));
    }
}
