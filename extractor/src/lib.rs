#![deny(missing_docs)]
//! Schema-constrained extraction of mining feasibility reports through
//! interchangeable LLM backends.
//!
//! The pipeline reads a report document, submits it to the selected
//! backend, requests a response constrained to the extraction schema,
//! and releases provider-side custody on every exit path. Backends
//! that support it can then answer follow-up questions about the same
//! document in a streamed conversation.

/// Backend implementations of the provider port.
pub mod adapters;
/// Backend selection and credential configuration.
pub mod config;
/// Follow-up conversation sessions.
pub mod conversation;
/// Error types for the pipeline.
pub mod errors;
/// The extraction pipeline.
pub mod orchestrator;
/// Instruction text sent to the backends.
pub mod prompts;
/// The backend port and its supporting types.
pub mod provider;
/// The extraction schema.
pub mod schema;

pub use config::{build_adapter, ProviderConfig, ProviderKind};
pub use conversation::ConversationSession;
pub use errors::ExtractError;
pub use orchestrator::{Extraction, Extractor};
pub use provider::{
    Analysis, AnswerEvent, AnswerStream, ContinuationHandle, Document, DocumentHandle,
    ProviderAdapter, RemoteDocument,
};
pub use schema::MiningReport;
