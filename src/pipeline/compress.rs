//! Compression pipeline: arbitrary API spec text → SlimSpec.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::constants::COMPRESSED_EXT;
use crate::format::{format_bytes, format_tokens};
use crate::provider::Completion;
use crate::stats::{round2, FileRecord, Stats};

use super::{
    discover_files, file_name_of, load_prompt, output_dir_for, prepare_output_dir, render_prompt,
    TransformOptions,
};

/// Runs one compression batch over the files matching `pattern`.
///
/// Prompt loading and empty discovery are fatal; everything after that is
/// best-effort per file.
pub async fn run(pattern: &str, opts: &TransformOptions, gateway: &dyn Completion) -> Result<()> {
    let prompt = load_prompt(&opts.prompt_path)?;
    println!(
        "{} Using compression prompt: {}",
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
        match compress_one(file, &prompt, opts, output_dir.as_deref(), gateway).await {
            Ok((out_file, record)) => {
                println!(
                    "{} Compressed {} → {} ({} of original size)",
                    "✔".green(),
                    file.display().to_string().cyan(),
                    out_file.display().to_string().green(),
                    format!("{:.2}%", record.ratio).yellow()
                );
                stats.add(record);
            }
            Err(err) => {
                eprintln!(
                    "{} Failed to compress {}: {:#}",
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

/// Transforms a single file: read, render, complete, prepend the metadata
/// header, write. Returns the output path and its statistics record.
pub(crate) async fn compress_one(
    file: &Path,
    prompt: &str,
    opts: &TransformOptions,
    output_dir: Option<&Path>,
    gateway: &dyn Completion,
) -> Result<(PathBuf, FileRecord)> {
    let file_name = file_name_of(file);
    let out_file =
        output_dir_for(file, output_dir)?.join(format!("{}.{}", file_name, COMPRESSED_EXT));

    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let original_size = content.chars().count();

    let result = gateway
        .complete(&opts.model, &render_prompt(prompt, &content))
        .await?;

    let compressed = format!(
        "<!-- SlimSpec compressed from {} using {} -->\n\n{}",
        file_name, opts.model, result
    );
    fs::write(&out_file, &compressed)
        .with_context(|| format!("Failed to write {}", out_file.display()))?;

    // The metadata header counts toward the compressed size.
    let compressed_size = compressed.chars().count();
    let record = FileRecord {
        path: file.display().to_string(),
        input_size: original_size,
        output_size: compressed_size,
        ratio: round2(compressed_size as f64 / original_size as f64 * 100.0),
    };
    Ok((out_file, record))
}

/// Prints the run summary. Always runs, even when every file failed.
fn print_summary(stats: &Stats) {
    println!("\n{}", "Compression Summary:".bold().underline());
    println!(
        "{} Processed: {} files",
        "→".blue(),
        stats.count().to_string().yellow()
    );
    println!(
        "{} Original size: {}",
        "→".blue(),
        format_bytes(stats.total_input() as u64).yellow()
    );
    println!(
        "{} Compressed size: {}",
        "→".blue(),
        format_bytes(stats.total_output() as u64).yellow()
    );
    println!(
        "{} Average ratio: {}",
        "→".blue(),
        format!("{:.2}%", stats.average_ratio()).yellow()
    );
    println!(
        "{} Estimated tokens saved: {}",
        "→".blue(),
        format_tokens(stats.estimated_tokens_saved()).yellow()
    );
}
