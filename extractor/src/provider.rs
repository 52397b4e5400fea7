//! The provider port: the single trait every LLM backend implements.
//!
//! Backends differ in how they take custody of a document (inline
//! bytes vs provider-side storage) and in whether they can continue a
//! conversation server-side. The port captures those differences in
//! [`DocumentHandle`] and [`ProviderAdapter::supports_conversation`]
//! so the orchestrator stays backend-agnostic.

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::errors::ExtractError;
use crate::schema::MiningReport;

/// An input document read from disk, ready for submission.
#[derive(Debug, Clone)]
pub struct Document {
    /// Raw document bytes.
    pub bytes: Bytes,
    /// Original file name, used as the display name provider-side.
    pub filename: String,
}

impl Document {
    /// Size of the document in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Whether the document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A document stored on the provider side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDocument {
    /// Provider identifier used for later release.
    pub id: String,
    /// Reference URI, when the provider issues one separately from the
    /// identifier.
    pub uri: Option<String>,
}

/// How an adapter took custody of a submitted document.
///
/// The orchestrator dispatches release on this: `Managed` handles are
/// released provider-side, `Inline` handles need no release call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentHandle {
    /// The document travels with each request; nothing is stored
    /// provider-side.
    Inline(Bytes),
    /// The document was stored provider-side and must be released.
    Managed(RemoteDocument),
}

impl DocumentHandle {
    /// Whether this handle refers to provider-side storage.
    #[must_use]
    pub fn is_managed(&self) -> bool {
        matches!(self, Self::Managed(_))
    }
}

/// Opaque token that resumes a provider-side conversation.
///
/// Each answered turn supersedes the previous token; the pipeline only
/// ever holds the latest one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationHandle(String);

impl ContinuationHandle {
    /// Wraps a provider-issued continuation token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One event of a streamed conversation answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerEvent {
    /// An incremental piece of answer text, in order.
    Fragment(String),
    /// The turn finished; `handle` resumes the conversation from here.
    Completed {
        /// Continuation token for the next turn.
        handle: ContinuationHandle,
    },
}

/// A stream of answer events for one conversation turn.
pub type AnswerStream = Pin<Box<dyn Stream<Item = Result<AnswerEvent, ExtractError>> + Send>>;

/// Result of a completed extraction call.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The extracted, schema-validated report.
    pub report: MiningReport,
    /// Continuation token when the backend supports follow-up
    /// conversation, `None` otherwise.
    pub continuation: Option<ContinuationHandle>,
}

/// The backend port.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Stable backend name used in logs and output.
    fn name(&self) -> &'static str;

    /// Takes custody of a document, returning the handle that later
    /// calls operate on.
    ///
    /// # Errors
    ///
    /// `Transport` or `Provider` on submission failure,
    /// `PayloadTooLarge` when the backend rejects the document by size.
    async fn submit_document(&self, document: &Document) -> Result<DocumentHandle, ExtractError>;

    /// Runs the extraction prompt against a submitted document.
    ///
    /// # Errors
    ///
    /// `SchemaViolation` when the backend's output does not parse into
    /// the extraction schema; `Transport` / `Provider` otherwise.
    async fn analyze(&self, handle: &DocumentHandle, prompt: &str)
        -> Result<Analysis, ExtractError>;

    /// Releases provider-side custody of a document.
    ///
    /// Infallible by contract: release failures are logged, never
    /// propagated, so they cannot mask the outcome of the extraction
    /// itself.
    async fn release_document(&self, handle: &DocumentHandle);

    /// Whether this backend can continue a conversation server-side.
    fn supports_conversation(&self) -> bool {
        false
    }

    /// Streams the answer to a follow-up question.
    ///
    /// # Errors
    ///
    /// `Provider` when the backend does not support conversation or
    /// the turn fails; `Transport` on network failure.
    async fn continue_conversation(
        &self,
        handle: &ContinuationHandle,
        question: &str,
    ) -> Result<AnswerStream, ExtractError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_kinds_dispatch_release_correctly() {
        let inline = DocumentHandle::Inline(Bytes::from_static(b"%PDF-1.4"));
        assert!(!inline.is_managed());

        let managed = DocumentHandle::Managed(RemoteDocument {
            id: "files/abc".to_string(),
            uri: Some("https://example/files/abc".to_string()),
        });
        assert!(managed.is_managed());
    }

    #[test]
    fn continuation_handle_round_trips_its_token() {
        let handle = ContinuationHandle::new("resp_123");
        assert_eq!(handle.as_str(), "resp_123");
        assert_eq!(handle.to_string(), "resp_123");
    }
}
