//! OpenAI backend, built on the Files and Responses APIs.
//!
//! Every document is stored provider-side first (`Managed` handle) and
//! referenced by file id in the extraction call. Conversation turns
//! chain through `previous_response_id`, so the backend reports
//! conversation support.

use async_trait::async_trait;
use futures::StreamExt;

use mrx_openai::{
    OpenAiClient, OpenAiError, ResponseInput, ResponseRequest, SchemaFormat, StreamEvent,
};

use crate::config::ProviderConfig;
use crate::errors::ExtractError;
use crate::prompts::CONVERSATION_INSTRUCTIONS;
use crate::provider::{
    Analysis, AnswerEvent, AnswerStream, ContinuationHandle, Document, DocumentHandle,
    ProviderAdapter, RemoteDocument,
};
use crate::schema::{descriptor::strict_descriptor, MiningReport};

/// Name reported to the API for the extraction schema.
const SCHEMA_NAME: &str = "mining_report";

/// [`ProviderAdapter`] implementation for OpenAI.
pub struct OpenAiAdapter {
    client: OpenAiClient,
    model: String,
}

impl OpenAiAdapter {
    /// Builds the adapter from validated configuration.
    ///
    /// # Errors
    ///
    /// `Configuration` when the underlying client rejects the key.
    pub fn new(config: &ProviderConfig) -> Result<Self, ExtractError> {
        let mut client =
            OpenAiClient::new(&config.api_key).map_err(|e| classify("configure", e))?;
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
fn classify(operation: &'static str, err: OpenAiError) -> ExtractError {
    match err {
        OpenAiError::Config(message) => ExtractError::Configuration(message),
        OpenAiError::Transport(e) => ExtractError::Transport {
            operation,
            message: e.to_string(),
        },
        OpenAiError::Api { status, message } => ExtractError::Provider {
            operation,
            message: format!("HTTP {status}: {message}"),
        },
        OpenAiError::PayloadTooLarge { bytes } => ExtractError::PayloadTooLarge { bytes },
        OpenAiError::Parse(message) | OpenAiError::Stream(message) => ExtractError::Provider {
            operation,
            message,
        },
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiAdapter {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn submit_document(&self, document: &Document) -> Result<DocumentHandle, ExtractError> {
        let file = self
            .client
            .upload_file(document.bytes.clone(), &document.filename)
            .await
            .map_err(|e| classify("submit", e))?;
        Ok(DocumentHandle::Managed(RemoteDocument {
            id: file.id,
            uri: None,
        }))
    }

    async fn analyze(
        &self,
        handle: &DocumentHandle,
        prompt: &str,
    ) -> Result<Analysis, ExtractError> {
        let DocumentHandle::Managed(remote) = handle else {
            return Err(ExtractError::Provider {
                operation: "analyze",
                message: "OpenAI analysis requires a stored document".to_string(),
            });
        };

        let mut request = ResponseRequest::new(&self.model);
        request.input = ResponseInput::FileWithText {
            file_id: remote.id.clone(),
            text: prompt.to_string(),
        };
        request.schema = Some(SchemaFormat {
            name: SCHEMA_NAME.to_string(),
            schema: strict_descriptor::<MiningReport>(),
        });

        let response = self
            .client
            .create_response(&request)
            .await
            .map_err(|e| classify("analyze", e))?;

        let text = response.output_text();
        if text.is_empty() {
            return Err(ExtractError::Provider {
                operation: "analyze",
                message: "response carried no output text".to_string(),
            });
        }

        let report: MiningReport = serde_json::from_str(&text)
            .map_err(|e| ExtractError::SchemaViolation(e.to_string()))?;

        Ok(Analysis {
            report,
            continuation: Some(ContinuationHandle::new(response.id)),
        })
    }

    async fn release_document(&self, handle: &DocumentHandle) {
        let DocumentHandle::Managed(remote) = handle else {
            return;
        };
        if let Err(err) = self.client.delete_file(&remote.id).await {
            tracing::warn!(file_id = %remote.id, error = %err, "Failed to release stored document");
        } else {
            tracing::debug!(file_id = %remote.id, "Released stored document");
        }
    }

    fn supports_conversation(&self) -> bool {
        true
    }

    async fn continue_conversation(
        &self,
        handle: &ContinuationHandle,
        question: &str,
    ) -> Result<AnswerStream, ExtractError> {
        let mut request = ResponseRequest::new(&self.model);
        request.instructions = Some(CONVERSATION_INSTRUCTIONS.to_string());
        request.previous_response_id = Some(handle.as_str().to_string());
        request.input = ResponseInput::Text(question.to_string());

        let stream = self
            .client
            .stream_response(&request)
            .await
            .map_err(|e| classify("converse", e))?;

        let mapped = stream.filter_map(|event| async move {
            match event {
                Ok(StreamEvent::OutputTextDelta(delta)) => {
                    Some(Ok(AnswerEvent::Fragment(delta)))
                }
                Ok(StreamEvent::Completed { response_id }) => Some(Ok(AnswerEvent::Completed {
                    handle: ContinuationHandle::new(response_id),
                })),
                Ok(StreamEvent::Failed { message }) => Some(Err(ExtractError::Provider {
                    operation: "converse",
                    message,
                })),
                Ok(StreamEvent::Ignored) => None,
                Err(e) => Some(Err(classify("converse", e))),
            }
        });

        Ok(Box::pin(mapped))
    }
}
