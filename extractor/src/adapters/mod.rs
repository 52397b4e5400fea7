//! Backend implementations of the provider port.

/// Gemini backend.
pub mod gemini;
/// OpenAI backend.
pub mod openai;

pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;
