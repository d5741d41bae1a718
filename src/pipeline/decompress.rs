//! Decompression pipeline: SlimSpec → full API spec text.
//!
//! Mirrors the compression pipeline with inverted policy: a skip filter
//! guards the per-file loop, output names drop the `.apaic` suffix, the
//! result is written verbatim with no added header, and display layers
//! invert the recorded ratio to express expansion.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::COMPRESSED_EXT;
use crate::format::{format_bytes, format_tokens};
use crate::provider::Completion;
use crate::stats::{round2, FileRecord, Stats};

use super::{
    discover_files, file_name_of, load_prompt, output_dir_for, prepare_output_dir, render_prompt,
    TransformOptions,
};

/// Matches the informational header written by compression; capture group 1
/// is the original filename. Display-only, never required for correctness.
static SOURCE_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!-- SlimSpec compressed from (.*?) using").unwrap());

/// Runs one decompression batch over the files matching `pattern`.
pub async fn run(pattern: &str, opts: &TransformOptions, gateway: &dyn Completion) -> Result<()> {
    let prompt = load_prompt(&opts.prompt_path)?;
    println!(
        "{} Using decompression prompt: {}",
        "→".blue(),
        opts.prompt_path.display().to_string().yellow()
    );

    let files = discover_files(pattern)?;
    println!(
        "{} Found {} files to process",
        "✔".green(),
        files.len().to_string().yellow()
    );

    let output_dir = match &opts.output_dir {
        Some(dir) => Some(prepare_output_dir(dir)?),
        None => None,
    };

    let mut stats = Stats::new();
    for file in &files {
        if !should_process(file, pattern) {
            println!(
                "{} Skipping non-apaic file: {}",
                "⚠".yellow(),
                file.display().to_string().cyan()
            );
            continue;
        }

        match decompress_one(file, &prompt, opts, output_dir.as_deref(), gateway).await {
            Ok((out_file, record, hint)) => {
                let expansion = round2(100.0 / record.ratio);
                let from = hint
                    .map(|h| format!(", from {}", h))
                    .unwrap_or_default();
                println!(
                    "{} Decompressed {} → {} (expanded to {} of compressed size{})",
                    "✔".green(),
                    file.display().to_string().cyan(),
                    out_file.display().to_string().green(),
                    format!("{:.2}%", expansion).yellow(),
                    from
                );
                stats.add(record);
            }
            Err(err) => {
                eprintln!(
                    "{} Failed to decompress {}: {:#}",
                    "✖".red(),
                    file.display().to_string().cyan(),
                    err
                );
            }
        }
    }

    print_summary(&stats);
    Ok(())
}

/// Skip filter: process only `.apaic` files, files without any extension, or
/// files named explicitly in the original pattern.
///
/// "Named explicitly" is literal substring containment of the path or its
/// basename inside the pattern string, matching the historical behavior; it
/// can misfire when a pattern coincidentally contains a filename as part of
/// an unrelated segment.
pub(crate) fn should_process(file: &Path, pattern: &str) -> bool {
    let ext = file
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());
    match ext {
        Some(ref ext) if ext == COMPRESSED_EXT => true,
        None => true,
        Some(_) => {
            let path_str = file.to_string_lossy();
            let base = file_name_of(file);
            pattern.contains(path_str.as_ref()) || pattern.contains(&base)
        }
    }
}

/// Transforms a single file: read, render, complete, write the raw result.
/// Returns the output path, the statistics record, and the source-file hint
/// parsed from the compression header, when present.
pub(crate) async fn decompress_one(
    file: &Path,
    prompt: &str,
    opts: &TransformOptions,
    output_dir: Option<&Path>,
    gateway: &dyn Completion,
) -> Result<(PathBuf, FileRecord, Option<String>)> {
    let file_name = file_name_of(file);
    let out_name = file_name
        .strip_suffix(&format!(".{}", COMPRESSED_EXT))
        .unwrap_or(&file_name)
        .to_string();
    let out_file = output_dir_for(file, output_dir)?.join(out_name);

    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let compressed_size = content.chars().count();
    let hint = source_hint(&content);

    let result = gateway
        .complete(&opts.model, &render_prompt(prompt, &content))
        .await?;

    fs::write(&out_file, &result)
        .with_context(|| format!("Failed to write {}", out_file.display()))?;

    let decompressed_size = result.chars().count();
    let record = FileRecord {
        path: file.display().to_string(),
        input_size: compressed_size,
        output_size: decompressed_size,
        // Still output-direction-over-input shrinkage; callers invert it.
        ratio: round2(compressed_size as f64 / decompressed_size as f64 * 100.0),
    };
    Ok((out_file, record, hint))
}

/// Extracts the original filename from the compression metadata header.
pub(crate) fn source_hint(content: &str) -> Option<String> {
    SOURCE_HINT
        .captures(content)
        .map(|captures| captures[1].to_string())
}

/// Prints the run summary with expansion framing. Always runs.
fn print_summary(stats: &Stats) {
    let average = stats.average_ratio();
    let expansion = if average == 0.0 { 0.0 } else { round2(100.0 / average) };

    println!("\n{}", "Decompression Summary:".bold().underline());
    println!(
        "{} Processed: {} files",
        "→".blue(),
        stats.count().to_string().yellow()
    );
    println!(
        "{} Compressed size: {}",
        "→".blue(),
        format_bytes(stats.total_input() as u64).yellow()
    );
    println!(
        "{} Decompressed size: {}",
        "→".blue(),
        format_bytes(stats.total_output() as u64).yellow()
    );
    println!(
        "{} Average expansion ratio: {}",
        "→".blue(),
        format!("{:.2}%", expansion).yellow()
    );
    println!(
        "{} Estimated tokens expanded: {}",
        "→".blue(),
        format_tokens(-stats.estimated_tokens_saved()).yellow()
    );
}
