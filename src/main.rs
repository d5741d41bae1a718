//! Entry point for slimspec, a CLI that compresses API specifications into
//! token-efficient SlimSpec notation (and back) via LLM completion calls.
//!
//! This binary loads environment variables, prints the banner, parses CLI
//! arguments via [`cli`], and dispatches to the chosen pipeline.

mod cli;
mod config;
mod constants;
mod format;
mod pipeline;
mod provider;
mod stats;

use anyhow::Result;
use colored::Colorize;

/// Runs the slimspec CLI.
///
/// Loads `.env` files (silently ignored if absent), parses command-line
/// arguments into a [`cli::Cli`] struct, and dispatches the chosen
/// subcommand via [`cli::run`]. The runtime is single-threaded: files are
/// transformed strictly one at a time.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    println!("{}", "SlimSpec".bold().cyan());
    println!(
        "{}\n",
        "Towards zero-shot API spec compression & decompression".dimmed()
    );
    let cli = cli::parse();
    cli::run(cli).await
}
