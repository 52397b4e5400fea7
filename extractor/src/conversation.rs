//! Multi-turn follow-up conversation over a completed extraction.
//!
//! The session holds exactly one continuation token at a time. A turn
//! swaps the token only after the backend's completion marker arrives,
//! so a turn abandoned mid-stream (the caller drops the future) leaves
//! the previous token in place and the session usable.

use std::sync::Arc;

use futures::StreamExt;

use crate::errors::ExtractError;
use crate::provider::{AnswerEvent, ContinuationHandle, ProviderAdapter};

/// Lifecycle of a conversation session.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    /// No completed extraction to continue from yet.
    Uninitialized,
    /// Ready to answer, holding the latest continuation token.
    Ready(ContinuationHandle),
    /// Closed; all further questions are rejected.
    Closed,
}

/// A follow-up conversation bound to one backend.
pub struct ConversationSession {
    adapter: Arc<dyn ProviderAdapter>,
    state: SessionState,
}

impl ConversationSession {
    /// Creates an uninitialized session; questions fail with
    /// `SessionNotReady` until a seed arrives.
    #[must_use]
    pub fn new(adapter: Arc<dyn ProviderAdapter>) -> Self {
        Self {
            adapter,
            state: SessionState::Uninitialized,
        }
    }

    /// Creates a session ready to answer from the given seed token.
    #[must_use]
    pub fn with_seed(adapter: Arc<dyn ProviderAdapter>, seed: ContinuationHandle) -> Self {
        Self {
            adapter,
            state: SessionState::Ready(seed),
        }
    }

    /// Whether the session can currently answer questions.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, SessionState::Ready(_))
    }

    /// The current continuation token, when the session is ready.
    #[must_use]
    pub fn continuation(&self) -> Option<&ContinuationHandle> {
        match &self.state {
            SessionState::Ready(handle) => Some(handle),
            _ => None,
        }
    }

    /// Asks a question and returns the complete answer text.
    ///
    /// # Errors
    ///
    /// As [`ask_with`](Self::ask_with).
    pub async fn ask(&mut self, question: &str) -> Result<String, ExtractError> {
        self.ask_with(question, |_| {}).await
    }

    /// Asks a question, invoking `on_fragment` for each streamed piece
    /// of the answer, and returns the assembled text.
    ///
    /// The session's token advances only when the stream delivers its
    /// completion marker; a stream that ends without one is a
    /// `Provider` error and the old token stays current.
    ///
    /// # Errors
    ///
    /// `SessionNotReady` when the session is uninitialized or closed;
    /// backend failures propagate with the turn unconsumed.
    pub async fn ask_with<F>(
        &mut self,
        question: &str,
        mut on_fragment: F,
    ) -> Result<String, ExtractError>
    where
        F: FnMut(&str),
    {
        let SessionState::Ready(current) = &self.state else {
            return Err(ExtractError::SessionNotReady);
        };

        let mut stream = self
            .adapter
            .continue_conversation(current, question)
            .await?;

        let mut answer = String::new();
        let mut next_handle = None;

        while let Some(event) = stream.next().await {
            match event? {
                AnswerEvent::Fragment(fragment) => {
                    on_fragment(&fragment);
                    answer.push_str(&fragment);
                }
                AnswerEvent::Completed { handle } => {
                    next_handle = Some(handle);
                }
            }
        }

        let handle = next_handle.ok_or(ExtractError::Provider {
            operation: "converse",
            message: "stream ended without completion marker".to_string(),
        })?;

        // The token swap is the last step; any earlier return leaves
        // the previous token in place.
        self.state = SessionState::Ready(handle);
        Ok(answer)
    }

    /// Closes the session; further questions fail with
    /// `SessionNotReady`.
    pub fn close(&mut self) {
        self.state = SessionState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{Analysis, AnswerStream, Document, DocumentHandle};
    use async_trait::async_trait;

    struct NoConversationAdapter;

    #[async_trait]
    impl ProviderAdapter for NoConversationAdapter {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn submit_document(
            &self,
            _document: &Document,
        ) -> Result<DocumentHandle, ExtractError> {
            unreachable!("not exercised")
        }

        async fn analyze(
            &self,
            _handle: &DocumentHandle,
            _prompt: &str,
        ) -> Result<Analysis, ExtractError> {
            unreachable!("not exercised")
        }

        async fn release_document(&self, _handle: &DocumentHandle) {}

        async fn continue_conversation(
            &self,
            _handle: &ContinuationHandle,
            _question: &str,
        ) -> Result<AnswerStream, ExtractError> {
            unreachable!("session state check must run first")
        }
    }

    #[tokio::test]
    async fn uninitialized_session_rejects_questions() {
        let mut session = ConversationSession::new(Arc::new(NoConversationAdapter));
        assert!(!session.is_ready());
        assert!(matches!(
            session.ask("grade?").await,
            Err(ExtractError::SessionNotReady)
        ));
    }

    #[tokio::test]
    async fn closed_session_rejects_questions() {
        let mut session = ConversationSession::with_seed(
            Arc::new(NoConversationAdapter),
            ContinuationHandle::new("resp_1"),
        );
        assert!(session.is_ready());
        session.close();
        assert!(!session.is_ready());
        assert!(matches!(
            session.ask("grade?").await,
            Err(ExtractError::SessionNotReady)
        ));
    }
}
