//! Provider kind enumeration.

/// Identifies which LLM provider to dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Anthropic (Claude models, messages API).
    Anthropic,
    /// OpenAI (chat-completions API).
    OpenAI,
    /// Google (Gemini models, generate-content API).
    Google,
    /// Deepseek (OpenAI-compatible chat-completions API).
    Deepseek,
}

impl ProviderKind {
    /// Matches a provider name case-insensitively. Returns `None` for
    /// anything outside the supported set; callers report that as an
    /// unsupported-provider error at call time.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "anthropic" => Some(Self::Anthropic),
            "openai" => Some(Self::OpenAI),
            "google" => Some(Self::Google),
            "deepseek" => Some(Self::Deepseek),
            _ => None,
        }
    }

    /// The environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Self::Anthropic => crate::constants::ANTHROPIC_API_KEY_VAR,
            Self::OpenAI => crate::constants::OPENAI_API_KEY_VAR,
            Self::Google => crate::constants::GOOGLE_API_KEY_VAR,
            Self::Deepseek => crate::constants::DEEPSEEK_API_KEY_VAR,
        }
    }

    /// Display label used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Anthropic => "Anthropic",
            Self::OpenAI => "OpenAI",
            Self::Google => "Google",
            Self::Deepseek => "Deepseek",
        }
    }
}
