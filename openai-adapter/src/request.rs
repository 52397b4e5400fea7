//! Request-body construction for the Responses API.

use serde_json::{json, Value};

/// Configuration for a single Responses API call.
#[derive(Debug, Clone, Default)]
pub struct ResponseRequest {
    /// Model identifier (e.g. `"o4-mini"`).
    pub model: String,
    /// Optional system-level instructions.
    pub instructions: Option<String>,
    /// Response id of the previous turn, for conversation chaining.
    pub previous_response_id: Option<String>,
    /// Input supplied to the model.
    pub input: ResponseInput,
    /// Optional structured-output constraint.
    pub schema: Option<SchemaFormat>,
}

/// Input payload for a Responses API call.
#[derive(Debug, Clone)]
pub enum ResponseInput {
    /// A bare user message, used for conversation turns.
    Text(String),
    /// A user message combining a stored file with an instruction text.
    FileWithText {
        /// Provider-side file id from a prior upload.
        file_id: String,
        /// Instruction text accompanying the file.
        text: String,
    },
}

impl Default for ResponseInput {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// JSON-schema constraint for structured output.
#[derive(Debug, Clone)]
pub struct SchemaFormat {
    /// Name reported to the API for this schema.
    pub name: String,
    /// The JSON schema itself.
    pub schema: Value,
}

impl ResponseRequest {
    /// Creates a request for the given model with empty input.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Serializes the request into the wire-format JSON body.
    #[must_use]
    pub fn to_body(&self, stream: bool) -> Value {
        let input = match &self.input {
            ResponseInput::Text(text) => json!(text),
            ResponseInput::FileWithText { file_id, text } => json!([
                {
                    "role": "user",
                    "content": [
                        {"type": "input_file", "file_id": file_id},
                        {"type": "input_text", "text": text},
                    ]
                }
            ]),
        };

        let mut body = json!({
            "model": self.model,
            "input": input,
        });

        if let Some(instructions) = &self.instructions {
            body["instructions"] = json!(instructions);
        }
        if let Some(previous) = &self.previous_response_id {
            body["previous_response_id"] = json!(previous);
        }
        if let Some(format) = &self.schema {
            body["text"] = json!({
                "format": {
                    "type": "json_schema",
                    "name": format.name,
                    "schema": format.schema,
                    "strict": true,
                }
            });
        }
        if stream {
            body["stream"] = json!(true);
        }

        body
    }
}
