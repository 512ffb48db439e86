//! notegen - programming notes generator
//!
//! A CLI tool that requests structured notes for a language/topic pair
//! and renders them as an HTML preview and a Word document.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputArgs};
use notegen::app_config::AppConfig;
use notegen::backend::HttpBackend;
use notegen::content_model::{ContentModel, ValidationError};
use notegen::controller::{FormController, FormPhase};
use notegen::{docx_exporter, html_preview};
use std::path::{Path, PathBuf};

/// Main entry point for the notegen CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            language,
            topic,
            endpoint,
            output,
        } => {
            handle_generate_command(language, topic, endpoint, &output)?;
        }

        Commands::Render { input, output } => {
            handle_render_command(&input, &output)?;
        }

        Commands::InitConfig { path, force } => {
            handle_init_config_command(&path, force)?;
        }
    }

    Ok(())
}

/// Initialize logging; `--verbose` forces info level, otherwise `RUST_LOG` applies
fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

/// Handle the generate command
fn handle_generate_command(
    language: String,
    topic: String,
    endpoint: Option<String>,
    output: &OutputArgs,
) -> Result<()> {
    init_logging(output.verbose);
    let config = load_config(&output.config)?;

    let endpoint = endpoint.unwrap_or_else(|| config.endpoint.clone());
    let backend = HttpBackend::new(endpoint.as_str(), config.request_timeout())
        .with_context(|| format!("Failed to create backend client for {}", endpoint))?;

    let mut form = FormController::new();
    form.set_language(language);
    form.set_topic(topic);

    println!("{} ({})", form.submit_label(), endpoint);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let phase = runtime
        .block_on(form.submit(&backend))
        .context("Failed to submit generation request")?
        .clone();

    if let FormPhase::Failed(reason) = phase {
        println!("{}", form.preview_html());
        anyhow::bail!("Generation request to {} failed: {}", endpoint, reason);
    }

    emit_outputs(form.result(), output, &config)
}

/// Handle the render command
fn handle_render_command(input: &Path, output: &OutputArgs) -> Result<()> {
    init_logging(output.verbose);
    let config = load_config(&output.config)?;

    let body = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read response file {}", input.display()))?;

    let validated = ContentModel::from_json_str(&body);
    if let Err(ref e) = validated {
        log::error!("Invalid response format in {}: {}", input.display(), e);
    }

    emit_outputs(Some(&validated), output, &config)
}

/// Handle the init-config command
fn handle_init_config_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it",
            path.display()
        );
    }

    AppConfig::default()
        .save(path)
        .with_context(|| format!("Failed to write config {}", path.display()))?;

    println!("✓ Wrote default configuration to {}", path.display());
    Ok(())
}

/// Load the configuration, falling back to defaults when the file is absent
fn load_config(path: &Path) -> Result<AppConfig> {
    AppConfig::load_or_default(path)
        .with_context(|| format!("Failed to load config {}", path.display()))
}

/// Print the preview and write the requested files
fn emit_outputs(
    result: Option<&Result<ContentModel, ValidationError>>,
    output: &OutputArgs,
    config: &AppConfig,
) -> Result<()> {
    println!("{}", html_preview::preview(result));

    let model = result.and_then(|r| r.as_ref().ok());
    if let Some(err) = result.and_then(|r| r.as_ref().err()) {
        eprintln!("Response rejected: {}", err);
    }

    if let (Some(html_path), Some(model)) = (&output.html, model) {
        html_preview::to_html_page(model, html_path)
            .with_context(|| format!("Failed to export HTML to {}", html_path.display()))?;
        println!("✓ Successfully wrote: {}", html_path.display());
    }

    if output.no_docx {
        return Ok(());
    }

    let out_dir: PathBuf = output
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());

    let written = docx_exporter::export(model, &out_dir)
        .with_context(|| format!("Failed to export DOCX to {}", out_dir.display()))?;
    println!("✓ Successfully wrote: {}", written.display());

    Ok(())
}
