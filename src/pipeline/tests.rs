use std::fs;
use std::path::Path;

use async_trait::async_trait;
use tempfile::tempdir;

use crate::config::ConfigSnapshot;
use crate::provider::{Completion, ProviderError};

use super::*;

/// Gateway double that returns a fixed completion without touching the network.
struct FixedGateway(&'static str);

#[async_trait]
impl Completion for FixedGateway {
    async fn complete(&self, _model: &str, _prompt: &str) -> Result<String, ProviderError> {
        Ok(self.0.to_string())
    }
}

/// Gateway double that always fails, for per-file error paths.
struct FailingGateway;

#[async_trait]
impl Completion for FailingGateway {
    async fn complete(&self, _model: &str, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Unsupported("mistral".to_string()))
    }
}

fn options(model: &str) -> TransformOptions {
    TransformOptions {
        model: model.to_string(),
        prompt_path: "unused.txt".into(),
        output_dir: None,
    }
}

#[test]
fn test_discover_files_glob() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.raml"), "a").unwrap();
    fs::write(dir.path().join("b.raml"), "b").unwrap();
    fs::create_dir(dir.path().join("sub.raml")).unwrap(); // directories are filtered

    let pattern = format!("{}/*.raml", dir.path().display());
    let files = discover_files(&pattern).unwrap();
    assert_eq!(files.len(), 2);
}

#[test]
fn test_discover_files_literal_fallback() {
    let dir = tempdir().unwrap();
    // Glob treats [] as a character class, so this name never matches itself
    // as a pattern; the literal-path fallback has to find it.
    let path = dir.path().join("spec [v1].yaml");
    fs::write(&path, "openapi: 3.0.0").unwrap();

    let files = discover_files(&path.display().to_string()).unwrap();
    assert_eq!(files, vec![path]);
}

#[test]
fn test_discover_files_empty_is_fatal() {
    let dir = tempdir().unwrap();
    let pattern = format!("{}/*.yaml", dir.path().display());
    let err = discover_files(&pattern).unwrap_err();
    assert!(err.to_string().contains("No files found matching pattern"));
}

#[test]
fn test_load_prompt_missing_is_fatal() {
    let err = load_prompt(Path::new("/nonexistent/prompt.txt")).unwrap_err();
    assert!(err.to_string().contains("Error loading prompt file"));
}

#[test]
fn test_render_prompt_replaces_first_occurrence_only() {
    let rendered = render_prompt("before {{CONTENT}} after {{CONTENT}}", "X");
    assert_eq!(rendered, "before X after {{CONTENT}}");
}

#[test]
fn test_render_prompt_without_placeholder_is_unchanged() {
    assert_eq!(render_prompt("no placeholder here", "X"), "no placeholder here");
}

#[test]
fn test_output_dir_for_defaults_to_input_parent() {
    let out = output_dir_for(Path::new("specs/api.raml"), None).unwrap();
    assert_eq!(out, Path::new("specs"));
    let out = output_dir_for(Path::new("api.raml"), None).unwrap();
    assert_eq!(out, Path::new("."));
}

#[tokio::test]
async fn test_compress_one_writes_header_blank_line_payload() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("api.raml");
    fs::write(&input, "#%RAML 1.0\ntitle: Test API\n").unwrap();

    let opts = options("anthropic:messages:claude-3-7-sonnet-latest");
    let gateway = FixedGateway("API Test v1");
    let (out_file, record) = compress::compress_one(&input, "{{CONTENT}}", &opts, None, &gateway)
        .await
        .unwrap();

    assert_eq!(out_file, dir.path().join("api.raml.apaic"));
    let written = fs::read_to_string(&out_file).unwrap();
    assert_eq!(
        written,
        "<!-- SlimSpec compressed from api.raml using anthropic:messages:claude-3-7-sonnet-latest -->\n\nAPI Test v1"
    );
    assert_eq!(record.input_size, "#%RAML 1.0\ntitle: Test API\n".chars().count());
    assert_eq!(record.output_size, written.chars().count());

    // Round trip: the compressed file must pass the decompression skip filter.
    assert!(decompress::should_process(&out_file, "*.apaic"));
}

#[tokio::test]
async fn test_compress_one_ratio() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("big.raml");
    fs::write(&input, "x".repeat(1000)).unwrap();

    // Pad the payload so header plus body lands at exactly 250 characters.
    let opts = options("anthropic");
    let header = "<!-- SlimSpec compressed from big.raml using anthropic -->\n\n";
    let payload: &'static str = Box::leak("s".repeat(250 - header.chars().count()).into_boxed_str());
    let gateway = FixedGateway(payload);
    let (_, record) = compress::compress_one(&input, "{{CONTENT}}", &opts, None, &gateway)
        .await
        .unwrap();
    assert_eq!(record.input_size, 1000);
    assert_eq!(record.output_size, 250);
    assert_eq!(record.ratio, 25.0);
}

#[tokio::test]
async fn test_compress_one_gateway_failure_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("api.raml");
    fs::write(&input, "title: x").unwrap();

    let result =
        compress::compress_one(&input, "{{CONTENT}}", &options("mistral"), None, &FailingGateway)
            .await;
    assert!(result.is_err());
    assert!(!dir.path().join("api.raml.apaic").exists());
}

#[tokio::test]
async fn test_decompress_one_strips_suffix_and_writes_raw() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("api.raml.apaic");
    fs::write(
        &input,
        "<!-- SlimSpec compressed from api.raml using anthropic -->\n\nA>v1",
    )
    .unwrap();

    let gateway = FixedGateway("#%RAML 1.0\ntitle: Test API\n");
    let (out_file, record, hint) =
        decompress::decompress_one(&input, "{{CONTENT}}", &options("anthropic"), None, &gateway)
            .await
            .unwrap();

    assert_eq!(out_file, dir.path().join("api.raml"));
    assert_eq!(
        fs::read_to_string(&out_file).unwrap(),
        "#%RAML 1.0\ntitle: Test API\n"
    );
    assert_eq!(hint.as_deref(), Some("api.raml"));
    assert_eq!(record.input_size, fs::read_to_string(&input).unwrap().chars().count());
    assert_eq!(record.output_size, "#%RAML 1.0\ntitle: Test API\n".chars().count());
}

#[tokio::test]
async fn test_decompress_ratio_is_reverse_direction() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("api.apaic");
    fs::write(&input, "x".repeat(1000)).unwrap();

    let payload: String = "y".repeat(250);
    let payload: &'static str = Box::leak(payload.into_boxed_str());
    let (_, record, _) =
        decompress::decompress_one(&input, "{{CONTENT}}", &options("anthropic"), None, &FixedGateway(payload))
            .await
            .unwrap();

    // compressed/decompressed × 100; display layers show 100/ratio = 25.00%.
    assert_eq!(record.ratio, 400.0);
    assert_eq!(crate::stats::round2(100.0 / record.ratio), 25.0);
}

#[test]
fn test_skip_filter_rejects_other_extensions() {
    assert!(!decompress::should_process(Path::new("notes.txt"), "specs/*"));
}

#[test]
fn test_skip_filter_accepts_apaic_and_extensionless() {
    assert!(decompress::should_process(Path::new("api.apaic"), "*"));
    assert!(decompress::should_process(Path::new("api.APAIC"), "*"));
    assert!(decompress::should_process(Path::new("README"), "*"));
}

#[test]
fn test_skip_filter_accepts_explicitly_named_files() {
    // Explicit mention by basename or full path inside the pattern string.
    assert!(decompress::should_process(Path::new("notes.txt"), "notes.txt"));
    assert!(decompress::should_process(
        Path::new("specs/notes.txt"),
        "specs/notes.txt"
    ));
}

#[test]
fn test_skip_filter_substring_containment_misfires_knowingly() {
    // Historical behavior: containment, not equality, so a pattern that
    // merely embeds the basename also passes the filter.
    assert!(decompress::should_process(
        Path::new("notes.txt"),
        "archive/notes.txt.bak"
    ));
}

#[test]
fn test_source_hint_parsing() {
    let hint = decompress::source_hint(
        "<!-- SlimSpec compressed from orders.yaml using openai:gpt-4 -->\n\nbody",
    );
    assert_eq!(hint.as_deref(), Some("orders.yaml"));
    assert_eq!(decompress::source_hint("no header"), None);
}

#[test]
fn test_transform_options_precedence() {
    let config = ConfigSnapshot {
        default_model: Some("openai:gpt-4".to_string()),
        compression_prompt: Some("custom-compress.txt".to_string()),
        ..Default::default()
    };

    // Flag beats config.
    let opts = TransformOptions::for_compress(
        Some("deepseek:deepseek-chat".to_string()),
        None,
        None,
        &config,
    );
    assert_eq!(opts.model, "deepseek:deepseek-chat");
    assert_eq!(opts.prompt_path, Path::new("custom-compress.txt"));

    // Config beats built-in default.
    let opts = TransformOptions::for_compress(None, None, None, &ConfigSnapshot::default());
    assert_eq!(opts.model, crate::constants::DEFAULT_MODEL_ID);
    assert_eq!(
        opts.prompt_path,
        Path::new(crate::constants::DEFAULT_COMPRESS_PROMPT)
    );

    let opts = TransformOptions::for_decompress(None, None, None, &ConfigSnapshot::default());
    assert_eq!(
        opts.prompt_path,
        Path::new(crate::constants::DEFAULT_DECOMPRESS_PROMPT)
    );
}
