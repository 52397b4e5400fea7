//! The extraction pipeline: read, submit, analyze, release.
//!
//! Release runs on every exit path once submission has produced a
//! `Managed` handle, including when the analysis itself fails. The
//! pipeline never retries; every failure surfaces to the caller with
//! its taxonomy variant intact.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;

use crate::conversation::ConversationSession;
use crate::errors::ExtractError;
use crate::prompts::EXTRACTION_PROMPT;
use crate::provider::{ContinuationHandle, Document, ProviderAdapter};
use crate::schema::MiningReport;

/// Outcome of one extraction run.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The extracted, schema-validated report.
    pub report: MiningReport,
    /// Continuation token seeding follow-up conversation, when the
    /// backend supports it.
    pub seed: Option<ContinuationHandle>,
}

/// Drives the extraction pipeline against one backend.
pub struct Extractor {
    adapter: Arc<dyn ProviderAdapter>,
}

impl Extractor {
    /// Creates an extractor over the given backend.
    #[must_use]
    pub fn new(adapter: Arc<dyn ProviderAdapter>) -> Self {
        Self { adapter }
    }

    /// The backend this extractor runs against.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.adapter.name()
    }

    /// Reads a document from disk and extracts it.
    ///
    /// # Errors
    ///
    /// `NotFound` when the path does not exist, checked before any
    /// network activity; otherwise as [`extract`](Self::extract).
    pub async fn extract_path(&self, path: &Path) -> Result<Extraction, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }

        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map_or_else(|| "document.pdf".to_string(), |n| n.to_string_lossy().into_owned());

        self.extract(Document {
            bytes: Bytes::from(bytes),
            filename,
        })
        .await
    }

    /// Runs the full pipeline on an in-memory document.
    ///
    /// # Errors
    ///
    /// Propagates adapter failures; the document is released even when
    /// analysis fails.
    pub async fn extract(&self, document: Document) -> Result<Extraction, ExtractError> {
        let started = Instant::now();
        tracing::info!(
            provider = self.adapter.name(),
            filename = %document.filename,
            size = document.len(),
            "Submitting document"
        );

        let handle = self.adapter.submit_document(&document).await?;

        // Analysis outcome is captured so release always runs before
        // the result is surfaced.
        let outcome = self.adapter.analyze(&handle, EXTRACTION_PROMPT).await;
        self.adapter.release_document(&handle).await;

        let analysis = outcome?;
        tracing::info!(
            provider = self.adapter.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Extraction complete"
        );

        Ok(Extraction {
            report: analysis.report,
            seed: analysis.continuation,
        })
    }

    /// Opens a conversation session seeded by a completed extraction.
    ///
    /// # Errors
    ///
    /// `SessionNotReady` when the backend does not support
    /// conversation or the extraction carried no continuation token.
    pub fn conversation(
        &self,
        extraction: &Extraction,
    ) -> Result<ConversationSession, ExtractError> {
        if !self.adapter.supports_conversation() {
            return Err(ExtractError::SessionNotReady);
        }
        let seed = extraction
            .seed
            .clone()
            .ok_or(ExtractError::SessionNotReady)?;
        Ok(ConversationSession::with_seed(self.adapter.clone(), seed))
    }
}
