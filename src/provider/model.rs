//! Model identifier parsing.
//!
//! Identifiers are colon-delimited: `provider[:family]:name`. The short
//! forms are resolved by a fixed precedence rule kept for backward
//! compatibility with existing identifier strings:
//!
//! - `anthropic` → family `messages`, built-in default model name
//! - `openai:gpt-4` → family `messages`, name `gpt-4`
//! - `google:messages:gemini-pro` → all three parts explicit
//!
//! The provider part is not validated here; unsupported providers are
//! reported when the gateway is invoked.

use std::str::FromStr;

use thiserror::Error;

use crate::constants::{DEFAULT_MODEL_FAMILY, DEFAULT_MODEL_NAME};

/// A parsed model identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    /// Provider name as written (case preserved).
    pub provider: String,
    /// Model family, e.g. `messages`.
    pub family: String,
    /// Model name sent to the provider.
    pub name: String,
}

/// Error for identifiers the parsing rules cannot apply to.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseModelError {
    #[error("model identifier is empty")]
    Empty,
}

impl FromStr for ModelSpec {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseModelError::Empty);
        }
        let parts: Vec<&str> = s.split(':').collect();
        let spec = match parts.as_slice() {
            [provider] => Self {
                provider: provider.to_string(),
                family: DEFAULT_MODEL_FAMILY.to_string(),
                name: DEFAULT_MODEL_NAME.to_string(),
            },
            [provider, name] => Self {
                provider: provider.to_string(),
                family: DEFAULT_MODEL_FAMILY.to_string(),
                name: name.to_string(),
            },
            [provider, family, rest @ ..] => Self {
                provider: provider.to_string(),
                family: family.to_string(),
                name: rest.join(":"),
            },
            [] => unreachable!("split always yields at least one part"),
        };
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_provider_uses_defaults() {
        let spec: ModelSpec = "openai".parse().unwrap();
        assert_eq!(spec.provider, "openai");
        assert_eq!(spec.family, "messages");
        assert_eq!(spec.name, "claude-3-7-sonnet-latest");
    }

    #[test]
    fn test_parse_provider_and_name() {
        let spec: ModelSpec = "openai:gpt-4".parse().unwrap();
        assert_eq!(spec.provider, "openai");
        assert_eq!(spec.family, "messages");
        assert_eq!(spec.name, "gpt-4");
    }

    #[test]
    fn test_parse_full_form() {
        let spec: ModelSpec = "google:messages:gemini-pro".parse().unwrap();
        assert_eq!(spec.provider, "google");
        assert_eq!(spec.family, "messages");
        assert_eq!(spec.name, "gemini-pro");
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert_eq!(
            "".parse::<ModelSpec>().unwrap_err(),
            ParseModelError::Empty
        );
    }

    #[test]
    fn test_parse_preserves_unknown_provider_for_call_time() {
        // Validation happens when the gateway dispatches, not here.
        let spec: ModelSpec = "mistral:small".parse().unwrap();
        assert_eq!(spec.provider, "mistral");
        assert_eq!(spec.name, "small");
    }
}
