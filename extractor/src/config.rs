//! Backend selection and credential configuration.
//!
//! Credentials come from the environment (`OPENAI_API_KEY`,
//! `GEMINI_API_KEY`); model and backend come from the command line
//! with per-backend defaults. Validation runs before any adapter is
//! built so a missing key fails fast, locally.

use std::str::FromStr;
use std::sync::Arc;

use crate::adapters::{GeminiAdapter, OpenAiAdapter};
use crate::errors::ExtractError;
use crate::provider::ProviderAdapter;

/// The selectable backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// OpenAI Responses API.
    OpenAi,
    /// Gemini generateContent API.
    Gemini,
}

impl ProviderKind {
    /// Environment variable holding this backend's API key.
    #[must_use]
    pub const fn api_key_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Model used when the command line does not name one.
    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "o4-mini",
            Self::Gemini => "gemini-2.5-flash",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi => f.write_str("openai"),
            Self::Gemini => f.write_str("gemini"),
        }
    }
}

/// Error returned when a backend name is not recognized.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown provider {0:?}, expected \"openai\" or \"gemini\"")]
pub struct UnknownProvider(String);

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Resolved configuration for one backend.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API key for the backend.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Base URL override, used in tests.
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Reads the configuration for `kind` from the environment.
    ///
    /// A missing key resolves to an empty string here; [`validate`]
    /// turns that into a `Configuration` error.
    ///
    /// [`validate`]: ProviderConfig::validate
    #[must_use]
    pub fn from_env(kind: ProviderKind, model: Option<String>) -> Self {
        Self {
            api_key: std::env::var(kind.api_key_var()).unwrap_or_default(),
            model: model.unwrap_or_else(|| kind.default_model().to_string()),
            base_url: None,
        }
    }

    /// Checks the configuration before any network use.
    ///
    /// # Errors
    ///
    /// `Configuration` when the API key or model is empty.
    pub fn validate(&self, kind: ProviderKind) -> Result<(), ExtractError> {
        if self.api_key.trim().is_empty() {
            return Err(ExtractError::Configuration(format!(
                "{} is not set; export it before running",
                kind.api_key_var()
            )));
        }
        if self.model.trim().is_empty() {
            return Err(ExtractError::Configuration(
                "model identifier must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builds the adapter for the selected backend.
///
/// # Errors
///
/// `Configuration` when the config fails validation.
pub fn build_adapter(
    kind: ProviderKind,
    config: &ProviderConfig,
) -> Result<Arc<dyn ProviderAdapter>, ExtractError> {
    config.validate(kind)?;
    match kind {
        ProviderKind::OpenAi => Ok(Arc::new(OpenAiAdapter::new(config)?)),
        ProviderKind::Gemini => Ok(Arc::new(GeminiAdapter::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_names_parse_case_insensitively() {
        assert_eq!("openai".parse::<ProviderKind>().ok(), Some(ProviderKind::OpenAi));
        assert_eq!("Gemini".parse::<ProviderKind>().ok(), Some(ProviderKind::Gemini));
        assert!("claude".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn default_models_differ_per_backend() {
        assert_eq!(ProviderKind::OpenAi.default_model(), "o4-mini");
        assert_eq!(ProviderKind::Gemini.default_model(), "gemini-2.5-flash");
    }

    #[test]
    fn empty_api_key_fails_validation_with_the_variable_name() {
        let config = ProviderConfig {
            api_key: "   ".to_string(),
            model: "o4-mini".to_string(),
            base_url: None,
        };
        let err = config.validate(ProviderKind::OpenAi).unwrap_err();
        assert!(
            err.to_string().contains("OPENAI_API_KEY"),
            "error must name the missing variable: {err}"
        );
    }

    #[test]
    fn empty_model_fails_validation() {
        let config = ProviderConfig {
            api_key: "sk-test".to_string(),
            model: String::new(),
            base_url: None,
        };
        assert!(matches!(
            config.validate(ProviderKind::Gemini),
            Err(ExtractError::Configuration(_))
        ));
    }

    #[test]
    fn build_adapter_rejects_invalid_config_before_any_network_use() {
        let config = ProviderConfig {
            api_key: String::new(),
            model: "o4-mini".to_string(),
            base_url: None,
        };
        assert!(matches!(
            build_adapter(ProviderKind::OpenAi, &config),
            Err(ExtractError::Configuration(_))
        ));
    }
}
