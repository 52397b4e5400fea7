//! Wire types for the Files and Responses APIs.

use serde::{Deserialize, Serialize};

/// A file stored on the provider side, returned by the upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileObject {
    /// Provider-assigned file identifier (`file-...`).
    pub id: String,
    /// Original filename as submitted.
    #[serde(default)]
    pub filename: String,
    /// Stored size in bytes.
    #[serde(default)]
    pub bytes: u64,
}

/// Result of a file deletion request.
#[derive(Debug, Clone, Deserialize)]
pub struct FileDeleted {
    /// Identifier of the deleted file.
    pub id: String,
    /// Whether the deletion was acknowledged.
    #[serde(default)]
    pub deleted: bool,
}

/// A completed (non-streaming) response object.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseObject {
    /// Response identifier, usable as `previous_response_id` in a later call.
    pub id: String,
    /// Terminal status reported by the API (`completed`, `failed`, ...).
    #[serde(default)]
    pub status: String,
    /// Output items produced by the model.
    #[serde(default)]
    pub output: Vec<OutputItem>,
    /// Error details when `status` is `failed`.
    #[serde(default)]
    pub error: Option<ResponseError>,
}

impl ResponseObject {
    /// Concatenates all `output_text` content blocks into a single string.
    #[must_use]
    pub fn output_text(&self) -> String {
        let mut text = String::new();
        for item in &self.output {
            for block in &item.content {
                if let ContentBlock::OutputText { text: t } = block {
                    text.push_str(t);
                }
            }
        }
        text
    }
}

/// Error payload attached to a failed response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseError {
    /// Human-readable error message.
    #[serde(default)]
    pub message: String,
}

/// A single item in the response output list.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputItem {
    /// Item type (`message`, `reasoning`, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Content blocks for `message` items.
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

/// A content block within an output message.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Generated text.
    OutputText {
        /// The text content.
        text: String,
    },
    /// A refusal emitted instead of text.
    Refusal {
        /// The refusal message.
        refusal: String,
    },
    /// Any block type this adapter does not interpret.
    #[serde(other)]
    Other,
}

/// A typed event received while streaming a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental chunk of output text.
    OutputTextDelta(String),
    /// The response finished; carries the id for conversation chaining.
    Completed {
        /// Identifier of the completed response.
        response_id: String,
    },
    /// The response failed on the provider side.
    Failed {
        /// Error message reported by the provider.
        message: String,
    },
    /// An event type this adapter does not interpret.
    Ignored,
}

impl StreamEvent {
    /// Parses one SSE `data:` payload into a typed event.
    pub(crate) fn from_json(val: &serde_json::Value) -> Self {
        match val.get("type").and_then(serde_json::Value::as_str) {
            Some("response.output_text.delta") => {
                let delta = val
                    .get("delta")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default();
                Self::OutputTextDelta(delta.to_string())
            }
            Some("response.completed") => {
                let response_id = val
                    .pointer("/response/id")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default();
                Self::Completed {
                    response_id: response_id.to_string(),
                }
            }
            Some("response.failed") | Some("error") => {
                let message = val
                    .pointer("/response/error/message")
                    .or_else(|| val.pointer("/error/message"))
                    .or_else(|| val.get("message"))
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("unknown provider failure")
                    .to_string();
                Self::Failed { message }
            }
            _ => Self::Ignored,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn output_text_concatenates_message_blocks() {
        let response: ResponseObject = serde_json::from_value(serde_json::json!({
            "id": "resp_1",
            "status": "completed",
            "output": [
                {"type": "reasoning", "content": []},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "{\"a\":"},
                    {"type": "output_text", "text": "1}"}
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(response.output_text(), "{\"a\":1}");
    }

    #[test]
    fn unknown_content_blocks_are_tolerated() {
        let response: ResponseObject = serde_json::from_value(serde_json::json!({
            "id": "resp_2",
            "output": [
                {"type": "message", "content": [
                    {"type": "tool_call", "name": "x"},
                    {"type": "output_text", "text": "ok"}
                ]}
            ]
        }))
        .unwrap();

        assert_eq!(response.output_text(), "ok");
    }

    #[test]
    fn stream_event_parses_delta_and_completion() {
        let delta = StreamEvent::from_json(&serde_json::json!({
            "type": "response.output_text.delta",
            "delta": "Hel"
        }));
        assert_eq!(delta, StreamEvent::OutputTextDelta("Hel".to_string()));

        let done = StreamEvent::from_json(&serde_json::json!({
            "type": "response.completed",
            "response": {"id": "resp_9"}
        }));
        assert_eq!(
            done,
            StreamEvent::Completed {
                response_id: "resp_9".to_string()
            }
        );
    }

    #[test]
    fn stream_event_surfaces_failures() {
        let failed = StreamEvent::from_json(&serde_json::json!({
            "type": "response.failed",
            "response": {"error": {"message": "rate limited"}}
        }));
        assert_eq!(
            failed,
            StreamEvent::Failed {
                message: "rate limited".to_string()
            }
        );
    }

    #[test]
    fn unrecognized_events_are_ignored() {
        let ev = StreamEvent::from_json(&serde_json::json!({
            "type": "response.in_progress"
        }));
        assert_eq!(ev, StreamEvent::Ignored);
    }
}
