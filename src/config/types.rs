//! The configuration snapshot struct and its pure layer merge.

use crate::provider::ProviderKind;

/// Effective configuration for one process invocation.
///
/// Every field is optional at every layer; absence only becomes an error
/// when a provider call needs the missing value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSnapshot {
    /// API key for Anthropic.
    pub anthropic_api_key: Option<String>,
    /// API key for OpenAI.
    pub openai_api_key: Option<String>,
    /// API key for Google.
    pub google_api_key: Option<String>,
    /// API key for Deepseek.
    pub deepseek_api_key: Option<String>,
    /// Default model identifier (`provider[:family]:name`).
    pub default_model: Option<String>,
    /// Default compression prompt path.
    pub compression_prompt: Option<String>,
    /// Default decompression prompt path.
    pub decompression_prompt: Option<String>,
    /// Default output directory.
    pub output_dir: Option<String>,
}

impl ConfigSnapshot {
    /// Overlays `over` on top of `self`. Fields present in `over` win.
    pub fn overlay(self, over: Self) -> Self {
        Self {
            anthropic_api_key: over.anthropic_api_key.or(self.anthropic_api_key),
            openai_api_key: over.openai_api_key.or(self.openai_api_key),
            google_api_key: over.google_api_key.or(self.google_api_key),
            deepseek_api_key: over.deepseek_api_key.or(self.deepseek_api_key),
            default_model: over.default_model.or(self.default_model),
            compression_prompt: over.compression_prompt.or(self.compression_prompt),
            decompression_prompt: over.decompression_prompt.or(self.decompression_prompt),
            output_dir: over.output_dir.or(self.output_dir),
        }
    }

    /// Folds ordered layers into one snapshot. Later layers take precedence.
    pub fn merged(layers: Vec<Self>) -> Self {
        layers
            .into_iter()
            .fold(Self::default(), |acc, layer| acc.overlay(layer))
    }

    /// The API key configured for the given provider, if any.
    pub fn api_key_for(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::Anthropic => self.anthropic_api_key.as_deref(),
            ProviderKind::OpenAI => self.openai_api_key.as_deref(),
            ProviderKind::Google => self.google_api_key.as_deref(),
            ProviderKind::Deepseek => self.deepseek_api_key.as_deref(),
        }
    }
}
