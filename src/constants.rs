//! Centralized constants for slimspec.
//!
//! All magic numbers, default strings, endpoint URLs, and environment
//! variable names live here so they can be changed in one place.

/// Default model identifier when neither the CLI flag nor config supplies one.
pub const DEFAULT_MODEL_ID: &str = "anthropic:messages:claude-3-7-sonnet-latest";

/// Default model name used when a model identifier omits it (bare provider).
pub const DEFAULT_MODEL_NAME: &str = "claude-3-7-sonnet-latest";

/// Default model family used when a model identifier omits it.
pub const DEFAULT_MODEL_FAMILY: &str = "messages";

/// Maximum tokens requested from every provider.
pub const MAX_TOKENS: u32 = 4000;

/// Settings filename looked up in the home directory and the working directory.
pub const RC_FILENAME: &str = ".slimspecrc";

/// Default compression prompt path (relative to the working directory).
pub const DEFAULT_COMPRESS_PROMPT: &str = "./prompts/slimspec-prompt-compress.txt";

/// Default decompression prompt path (relative to the working directory).
pub const DEFAULT_DECOMPRESS_PROMPT: &str = "./prompts/slimspec-prompt-decompress.txt";

/// Placeholder in prompt templates replaced with the file content.
pub const CONTENT_PLACEHOLDER: &str = "{{CONTENT}}";

/// Extension appended to compressed files (without the dot).
pub const COMPRESSED_EXT: &str = "apaic";

/// Approximate characters per token, used for the token-delta estimate.
pub const CHARS_PER_TOKEN: i64 = 4;

// --- Provider endpoints ---

/// Anthropic messages endpoint.
pub const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

/// API version header value pinned for Anthropic requests.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// OpenAI chat-completions endpoint.
pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Deepseek chat-completions endpoint (OpenAI-compatible shape).
pub const DEEPSEEK_CHAT_URL: &str = "https://api.deepseek.com/v1/chat/completions";

/// Google generate-content endpoint prefix; the model name and key are
/// appended per request.
pub const GOOGLE_GENERATE_URL: &str = "https://generativelanguage.googleapis.com/v1/models";

// --- Environment variables / rc-file keys ---

/// Anthropic API key variable.
pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// OpenAI API key variable.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Google API key variable.
pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Deepseek API key variable.
pub const DEEPSEEK_API_KEY_VAR: &str = "DEEPSEEK_API_KEY";

/// Default model override variable.
pub const DEFAULT_MODEL_VAR: &str = "DEFAULT_MODEL";

/// Compression prompt path override variable.
pub const COMPRESSION_PROMPT_VAR: &str = "COMPRESSION_PROMPT";

/// Decompression prompt path override variable.
pub const DECOMPRESSION_PROMPT_VAR: &str = "DECOMPRESSION_PROMPT";

/// Output directory override variable.
pub const OUTPUT_DIR_VAR: &str = "OUTPUT_DIR";
