//! The LLM gateway: one completion round trip per call.
//!
//! [`LlmGateway`] parses the model identifier, matches the provider tag,
//! and reproduces each vendor's request shape exactly. No retries, no
//! streaming, no timeout override beyond the transport default. Pipelines
//! talk to the [`Completion`] trait so tests can mock the network edge.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::ConfigSnapshot;
use crate::constants::{
    ANTHROPIC_MESSAGES_URL, ANTHROPIC_VERSION, DEEPSEEK_CHAT_URL, GOOGLE_GENERATE_URL,
    MAX_TOKENS, OPENAI_CHAT_URL,
};

use super::kind::ProviderKind;
use super::model::{ModelSpec, ParseModelError};

/// Gateway failure taxonomy. Every variant is recoverable at the per-file
/// boundary of a batch run.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The identifier could not be parsed at all.
    #[error(transparent)]
    InvalidModel(#[from] ParseModelError),
    /// Provider name outside the supported set.
    #[error("Unsupported LLM provider: {0}")]
    Unsupported(String),
    /// No API key available for the selected provider.
    #[error("{0} is not set in environment or config")]
    CredentialMissing(&'static str),
    /// The request could not be sent or the response body not read.
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// Non-success HTTP status from the provider.
    #[error("{provider} API error: {status} {status_text}")]
    Http {
        provider: &'static str,
        status: u16,
        status_text: String,
    },
    /// The response decoded but the completion text was missing.
    #[error("{provider} response is missing the completion text")]
    MalformedResponse { provider: &'static str },
}

/// A single-shot completion call: fully rendered prompt in, raw text out.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ProviderError>;
}

/// HTTP-backed gateway over the supported providers.
pub struct LlmGateway {
    http: reqwest::Client,
    config: ConfigSnapshot,
}

impl LlmGateway {
    pub fn new(config: ConfigSnapshot) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// The API key for `kind`, or the error naming its environment variable.
    fn api_key(&self, kind: ProviderKind) -> Result<&str, ProviderError> {
        self.config
            .api_key_for(kind)
            .ok_or(ProviderError::CredentialMissing(kind.api_key_var()))
    }

    async fn call_anthropic(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let provider = ProviderKind::Anthropic.label();
        let key = self.api_key(ProviderKind::Anthropic)?;

        let response = self
            .http
            .post(ANTHROPIC_MESSAGES_URL)
            .header("x-api-key", key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&json!({
                "model": model,
                "max_tokens": MAX_TOKENS,
                "messages": [{ "role": "user", "content": prompt }],
            }))
            .send()
            .await
            .map_err(|source| ProviderError::Transport { provider, source })?;

        let body: AnthropicResponse = decode(provider, response).await?;
        body.content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or(ProviderError::MalformedResponse { provider })
    }

    /// OpenAI and Deepseek share the chat-completions request/response shape;
    /// only the base URL and credential differ.
    async fn call_chat_completions(
        &self,
        kind: ProviderKind,
        url: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let provider = kind.label();
        let key = self.api_key(kind)?;

        let response = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", key))
            .json(&json!({
                "model": model,
                "max_tokens": MAX_TOKENS,
                "messages": [{ "role": "user", "content": prompt }],
            }))
            .send()
            .await
            .map_err(|source| ProviderError::Transport { provider, source })?;

        let body: ChatCompletionsResponse = decode(provider, response).await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or(ProviderError::MalformedResponse { provider })
    }

    async fn call_google(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let provider = ProviderKind::Google.label();
        let key = self.api_key(ProviderKind::Google)?;
        let url = format!("{}/{}:generateContent", GOOGLE_GENERATE_URL, model);

        let response = self
            .http
            .post(&url)
            .query(&[("key", key)])
            .json(&json!({
                "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
                "generationConfig": { "maxOutputTokens": MAX_TOKENS },
            }))
            .send()
            .await
            .map_err(|source| ProviderError::Transport { provider, source })?;

        let body: GoogleResponse = decode(provider, response).await?;
        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or(ProviderError::MalformedResponse { provider })
    }
}

#[async_trait]
impl Completion for LlmGateway {
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let spec: ModelSpec = model.parse()?;
        let kind = ProviderKind::from_name(&spec.provider)
            .ok_or_else(|| ProviderError::Unsupported(spec.provider.clone()))?;

        match kind {
            ProviderKind::Anthropic => self.call_anthropic(&spec.name, prompt).await,
            ProviderKind::OpenAI => {
                self.call_chat_completions(kind, OPENAI_CHAT_URL, &spec.name, prompt)
                    .await
            }
            ProviderKind::Deepseek => {
                self.call_chat_completions(kind, DEEPSEEK_CHAT_URL, &spec.name, prompt)
                    .await
            }
            ProviderKind::Google => self.call_google(&spec.name, prompt).await,
        }
    }
}

/// Maps a non-success status to [`ProviderError::Http`], otherwise decodes
/// the JSON body; a body that fails to decode counts as malformed.
async fn decode<T: serde::de::DeserializeOwned>(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Http {
            provider,
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|_| ProviderError::MalformedResponse { provider })
}

// Response shapes, trimmed to the fields the gateway extracts.

#[derive(Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
}

#[derive(Deserialize)]
struct GoogleCandidate {
    content: Option<GoogleContent>,
}

#[derive(Deserialize)]
struct GoogleContent {
    #[serde(default)]
    parts: Vec<GooglePart>,
}

#[derive(Deserialize)]
struct GooglePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unsupported_provider_fails_at_call_time() {
        let gateway = LlmGateway::new(ConfigSnapshot::default());
        let err = gateway.complete("mistral:small", "hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported(p) if p == "mistral"));
    }

    #[tokio::test]
    async fn test_empty_model_is_parse_error() {
        let gateway = LlmGateway::new(ConfigSnapshot::default());
        let err = gateway.complete("", "hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidModel(_)));
    }

    #[tokio::test]
    async fn test_missing_credential_names_the_variable() {
        let config = ConfigSnapshot {
            // No deepseek key configured.
            anthropic_api_key: Some("sk-ant".to_string()),
            ..Default::default()
        };
        let gateway = LlmGateway::new(config);
        let err = gateway
            .complete("deepseek:deepseek-chat", "hi")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ProviderError::CredentialMissing("DEEPSEEK_API_KEY")
        ));
    }

    #[test]
    fn test_anthropic_response_extraction() {
        let body: AnthropicResponse =
            serde_json::from_str(r#"{"content":[{"type":"text","text":"slim"}]}"#).unwrap();
        assert_eq!(body.content[0].text.as_deref(), Some("slim"));
    }

    #[test]
    fn test_chat_completions_response_extraction() {
        let body: ChatCompletionsResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"slim"}}]}"#,
        )
        .unwrap();
        let text = body.choices[0]
            .message
            .as_ref()
            .and_then(|m| m.content.as_deref());
        assert_eq!(text, Some("slim"));
    }

    #[test]
    fn test_google_response_extraction() {
        let body: GoogleResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"slim"}]}}]}"#,
        )
        .unwrap();
        let text = body.candidates[0]
            .content
            .as_ref()
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref());
        assert_eq!(text, Some("slim"));
    }

    #[test]
    fn test_malformed_response_shapes_decode_to_empty() {
        let body: AnthropicResponse = serde_json::from_str(r#"{"id":"msg_1"}"#).unwrap();
        assert!(body.content.is_empty());
        let body: ChatCompletionsResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(body.choices.is_empty());
    }
}
