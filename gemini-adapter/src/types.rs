//! Wire types for the Gemini generateContent and Files APIs.

use serde::{Deserialize, Serialize};

/// One part of a content payload.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    /// Plain instruction text.
    Text {
        /// The text content.
        text: String,
    },
    /// Document bytes carried inline with the request.
    InlineData {
        /// The inline blob.
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    /// Reference to a file previously stored via the Files API.
    FileData {
        /// The stored-file reference.
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

impl Part {
    /// Builds a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Builds an inline-data part, base64-encoding the bytes.
    #[must_use]
    pub fn inline_bytes(data: &[u8], mime_type: impl Into<String>) -> Self {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;

        Self::InlineData {
            inline_data: Blob {
                mime_type: mime_type.into(),
                data: STANDARD.encode(data),
            },
        }
    }

    /// Builds a stored-file reference part.
    #[must_use]
    pub fn file_uri(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::FileData {
            file_data: FileData {
                mime_type: mime_type.into(),
                file_uri: uri.into(),
            },
        }
    }
}

/// Base64-encoded inline bytes.
#[derive(Debug, Clone, Serialize)]
pub struct Blob {
    /// MIME type of the bytes.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Base64-encoded content.
    pub data: String,
}

/// Reference to a file stored on the provider side.
#[derive(Debug, Clone, Serialize)]
pub struct FileData {
    /// MIME type of the stored file.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Provider URI of the stored file.
    #[serde(rename = "fileUri")]
    pub file_uri: String,
}

/// Generation controls for a generateContent call.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Requested response MIME type (`application/json` for extraction).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// JSON schema the response must conform to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

/// Body of a generateContent request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Ordered content turns (a single user turn for extraction).
    pub contents: Vec<Content>,
    /// Optional generation controls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// One content turn.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// Parts making up this turn.
    pub parts: Vec<Part>,
}

/// Response from a generateContent call.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidate outputs (typically one).
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    ///
    /// Returns `None` when there is no candidate or it carries no text.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// One candidate output.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Generated content.
    #[serde(default)]
    pub content: CandidateContent,
    /// Why generation stopped (`STOP`, `SAFETY`, ...).
    #[serde(rename = "finishReason", default)]
    pub finish_reason: Option<String>,
}

/// Content of a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    /// Output parts.
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

/// One output part of a candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidatePart {
    /// Text payload, when present.
    #[serde(default)]
    pub text: Option<String>,
}

/// Metadata of a file stored via the Files API.
#[derive(Debug, Clone, Deserialize)]
pub struct FileMetadata {
    /// Resource name (`files/abc-123`), used for deletion.
    pub name: String,
    /// Download/reference URI, used in `fileData` parts.
    #[serde(default)]
    pub uri: String,
    /// MIME type recorded by the provider.
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
}

/// Envelope returned by the upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    /// The stored file's metadata.
    pub file: FileMetadata,
}
