//! Batch transformation pipelines.
//!
//! [`compress`] and [`decompress`] are the two mirrored instantiations of
//! the same skeleton: load prompt (fatal), discover files (fatal), then per
//! file read → transform via the gateway → write → record statistics, with
//! per-file failures reported and the loop continuing. The shared machinery
//! lives here.

pub mod compress;
pub mod decompress;

#[cfg(test)]
mod tests;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::config::ConfigSnapshot;
use crate::constants::{
    CONTENT_PLACEHOLDER, DEFAULT_COMPRESS_PROMPT, DEFAULT_DECOMPRESS_PROMPT, DEFAULT_MODEL_ID,
};

/// Resolved per-run options for one pipeline invocation.
///
/// Each field follows the same precedence: CLI flag > config snapshot >
/// built-in default.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Model identifier handed to the gateway verbatim.
    pub model: String,
    /// Prompt template path.
    pub prompt_path: PathBuf,
    /// Output directory; `None` writes alongside each input file.
    pub output_dir: Option<PathBuf>,
}

impl TransformOptions {
    pub fn for_compress(
        model: Option<String>,
        prompt: Option<PathBuf>,
        output: Option<PathBuf>,
        config: &ConfigSnapshot,
    ) -> Self {
        Self::resolve(model, prompt, output, config, true)
    }

    pub fn for_decompress(
        model: Option<String>,
        prompt: Option<PathBuf>,
        output: Option<PathBuf>,
        config: &ConfigSnapshot,
    ) -> Self {
        Self::resolve(model, prompt, output, config, false)
    }

    fn resolve(
        model: Option<String>,
        prompt: Option<PathBuf>,
        output: Option<PathBuf>,
        config: &ConfigSnapshot,
        compressing: bool,
    ) -> Self {
        let config_prompt = if compressing {
            config.compression_prompt.as_deref()
        } else {
            config.decompression_prompt.as_deref()
        };
        let default_prompt = if compressing {
            DEFAULT_COMPRESS_PROMPT
        } else {
            DEFAULT_DECOMPRESS_PROMPT
        };
        Self {
            model: model
                .or_else(|| config.default_model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            prompt_path: prompt.unwrap_or_else(|| {
                PathBuf::from(config_prompt.unwrap_or(default_prompt))
            }),
            output_dir: output.or_else(|| config.output_dir.clone().map(PathBuf::from)),
        }
    }
}

/// Expands a glob pattern into an ordered list of files.
///
/// Directories are filtered out. When the expansion matches nothing and the
/// pattern carries no wildcard, the pattern is retried as a literal file
/// path. An empty final list aborts the run.
pub fn discover_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    match glob::glob(pattern) {
        Ok(paths) => {
            for path in paths.flatten() {
                if path.is_file() {
                    files.push(path);
                }
            }
        }
        Err(err) => bail!("Error searching for files: {err}"),
    }

    if files.is_empty() && !pattern.contains('*') {
        let candidate = Path::new(pattern);
        if candidate.is_file() {
            files.push(candidate.to_path_buf());
        }
    }

    if files.is_empty() {
        bail!("No files found matching pattern: {pattern}");
    }
    Ok(files)
}

/// Reads the prompt template. Failure here aborts the whole run, before any
/// input file is touched.
pub fn load_prompt(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Error loading prompt file: {}", path.display()))
}

/// Substitutes the file content into the template. Only the first
/// placeholder occurrence is replaced; a template without a placeholder is
/// sent as-is.
pub fn render_prompt(template: &str, content: &str) -> String {
    template.replacen(CONTENT_PLACEHOLDER, content, 1)
}

/// Resolves the output directory to an absolute path and creates it if
/// needed. Safe to call repeatedly.
pub fn prepare_output_dir(dir: &Path) -> Result<PathBuf> {
    let resolved = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        std::env::current_dir()?.join(dir)
    };
    if !resolved.exists() {
        fs::create_dir_all(&resolved)
            .with_context(|| format!("Failed to create output directory {}", resolved.display()))?;
        println!(
            "{} Created output directory: {}",
            "→".blue(),
            resolved.display().to_string().yellow()
        );
    }
    Ok(resolved)
}

/// The directory one input file's output goes to.
///
/// With an output directory, the input's parent (relative to the working
/// directory) is mirrored underneath it, creating intermediate directories
/// as needed. Without one, output lands next to the input.
pub fn output_dir_for(input: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    let parent = input.parent().filter(|p| !p.as_os_str().is_empty());
    let Some(out) = output_dir else {
        return Ok(parent.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(".")));
    };

    let cwd = std::env::current_dir()?;
    let abs_parent = match parent {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd.clone(),
    };
    let relative = pathdiff::diff_paths(&abs_parent, &cwd).unwrap_or_default();
    let target = out.join(relative);
    if !target.exists() {
        fs::create_dir_all(&target)
            .with_context(|| format!("Failed to create output directory {}", target.display()))?;
    }
    Ok(target)
}

/// Basename of a path for display and metadata headers.
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
