//! Command-line interface definition and dispatch for slimspec.
//!
//! Uses [`clap`] for argument parsing with derive macros. Both subcommands
//! resolve their options against the loaded [`ConfigSnapshot`], build the
//! gateway once, and hand off to the matching pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ConfigSnapshot;
use crate::pipeline::{self, TransformOptions};
use crate::provider::LlmGateway;

/// Top-level CLI structure for slimspec.
#[derive(Parser)]
#[command(
    name = "slimspec",
    about = "A token-optimized format for representing API specifications with semantic precision",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands. The `///` doc comments double as `--help` text.
#[derive(Subcommand)]
pub enum Commands {
    /// Compress API specifications to SlimSpec format
    C {
        /// File or directory pattern to process
        pattern: String,
        /// Output directory (if not specified, files are saved next to originals)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// LLM model to use (provider[:family]:name)
        #[arg(short, long)]
        model: Option<String>,
        /// Custom compression prompt file
        #[arg(short, long)]
        prompt: Option<PathBuf>,
    },
    /// Decompress SlimSpec to full API specifications
    D {
        /// File or directory pattern to process
        pattern: String,
        /// Output directory (if not specified, files are saved next to originals)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// LLM model to use (provider[:family]:name)
        #[arg(short, long)]
        model: Option<String>,
        /// Custom decompression prompt file
        #[arg(short, long)]
        prompt: Option<PathBuf>,
    },
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its pipeline.
///
/// Fatal pipeline errors (unreadable prompt, empty discovery) propagate out
/// and exit non-zero; per-file failures inside a batch do not.
pub async fn run(cli: Cli) -> Result<()> {
    let config = ConfigSnapshot::load();
    match cli.command {
        Commands::C {
            pattern,
            output,
            model,
            prompt,
        } => {
            let opts = TransformOptions::for_compress(model, prompt, output, &config);
            let gateway = LlmGateway::new(config);
            pipeline::compress::run(&pattern, &opts, &gateway).await
        }
        Commands::D {
            pattern,
            output,
            model,
            prompt,
        } => {
            let opts = TransformOptions::for_decompress(model, prompt, output, &config);
            let gateway = LlmGateway::new(config);
            pipeline::decompress::run(&pattern, &opts, &gateway).await
        }
    }
}
