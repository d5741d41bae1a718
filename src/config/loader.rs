//! Layer construction from `.slimspecrc` files and the environment.

use std::fs;
use std::path::Path;

use crate::constants;

use super::types::ConfigSnapshot;

impl ConfigSnapshot {
    /// Builds a layer from an rc file. Read or parse trouble is treated the
    /// same as an absent file: an empty layer.
    pub(super) fn from_rc_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_rc_str(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Parses `KEY=value` lines. Blank lines, `#`/`;` comments, and
    /// `[section]` headers are ignored; surrounding quotes are stripped.
    pub(super) fn from_rc_str(contents: &str) -> Self {
        let mut layer = Self::default();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with(';')
                || line.starts_with('[')
            {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = unquote(value.trim());
            if value.is_empty() {
                continue;
            }
            layer.set(key.trim(), value.to_string());
        }
        layer
    }

    /// Builds a layer from environment variables. Empty values are ignored.
    pub(super) fn from_env() -> Self {
        let mut layer = Self::default();
        for key in [
            constants::ANTHROPIC_API_KEY_VAR,
            constants::OPENAI_API_KEY_VAR,
            constants::GOOGLE_API_KEY_VAR,
            constants::DEEPSEEK_API_KEY_VAR,
            constants::DEFAULT_MODEL_VAR,
            constants::COMPRESSION_PROMPT_VAR,
            constants::DECOMPRESSION_PROMPT_VAR,
            constants::OUTPUT_DIR_VAR,
        ] {
            if let Ok(value) = std::env::var(key) {
                if !value.is_empty() {
                    layer.set(key, value);
                }
            }
        }
        layer
    }

    /// Assigns a value by its rc-file/environment key. Unknown keys are ignored.
    fn set(&mut self, key: &str, value: String) {
        match key {
            constants::ANTHROPIC_API_KEY_VAR => self.anthropic_api_key = Some(value),
            constants::OPENAI_API_KEY_VAR => self.openai_api_key = Some(value),
            constants::GOOGLE_API_KEY_VAR => self.google_api_key = Some(value),
            constants::DEEPSEEK_API_KEY_VAR => self.deepseek_api_key = Some(value),
            constants::DEFAULT_MODEL_VAR => self.default_model = Some(value),
            constants::COMPRESSION_PROMPT_VAR => self.compression_prompt = Some(value),
            constants::DECOMPRESSION_PROMPT_VAR => self.decompression_prompt = Some(value),
            constants::OUTPUT_DIR_VAR => self.output_dir = Some(value),
            _ => {}
        }
    }
}

/// Strips one pair of matching surrounding quotes, if present.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
