//! Promptcraft - structured AI prompt editor
//!
//! CLI entry point for the terminal editor and one-shot rendering.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use promptstore::{ListField, Prompt, PromptStore, TextField};
use serde::Serialize;
use tracing::{debug, info};

use promptcraft::cli::{Cli, Command, OutputFormat, get_log_path};
use promptcraft::config::Config;
use promptcraft::export::Exporter;
use promptcraft::tui;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Log to a file: the editor owns the terminal
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    // Append so `pc logs` can show earlier sessions
    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        None | Some(Command::Edit) => cmd_edit(&config),
        Some(Command::Render {
            name,
            role,
            context,
            instructions,
            constraints,
            verification,
            output_format,
            template,
            format,
        }) => {
            let prompt = Prompt {
                name,
                role,
                context,
                instructions,
                constraints,
                verification,
                output_format,
                created_at: String::new(),
            };
            cmd_render(&config, prompt, template.as_deref(), format)
        }
        Some(Command::Config { write }) => cmd_config(&config, write.as_deref()),
        Some(Command::Logs { lines }) => cmd_logs(lines),
    }
}

/// Run the interactive editor
fn cmd_edit(config: &Config) -> Result<()> {
    let exporter = Exporter::new(config, None)?;
    info!("Starting editor (template override: {})", exporter.uses_template());
    tui::run(config, exporter)
}

/// JSON shape of the render command
#[derive(Serialize)]
struct RenderOutput<'a> {
    prompt: &'a Prompt,
    rendered: String,
}

/// Build a prompt from flags, save it through a store and print it
fn cmd_render(config: &Config, draft: Prompt, template: Option<&Path>, format: OutputFormat) -> Result<()> {
    debug!(name = %draft.name, %format, "cmd_render: called");
    let exporter = Exporter::new(config, template)?;

    let Prompt {
        name,
        role,
        context,
        instructions,
        constraints,
        verification,
        output_format,
        ..
    } = draft;

    let mut store = PromptStore::new();
    let current = store.current_mut();
    current.set_text(TextField::Name, name);
    current.set_text(TextField::Role, role);
    current.set_text(TextField::Context, context);
    current.set_text(TextField::OutputFormat, output_format);

    for (field, items) in [
        (ListField::Instructions, instructions),
        (ListField::Constraints, constraints),
        (ListField::Verification, verification),
    ] {
        for item in items {
            if !store.add_list_item(field, item) {
                eprintln!("{} Skipping empty {}", "!".yellow(), field.item_label());
            }
        }
    }

    store.save()?;
    let saved = store.get(0).ok_or_else(|| eyre::eyre!("Saved prompt missing from store"))?;
    let rendered = exporter.render(saved)?;

    match format {
        OutputFormat::Text => print!("{}", rendered),
        OutputFormat::Json => {
            let output = RenderOutput { prompt: saved, rendered };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Print or write the effective configuration
fn cmd_config(config: &Config, write: Option<&Path>) -> Result<()> {
    match write {
        Some(path) => {
            config.save(path)?;
            println!("{} Wrote config to {}", "✓".green(), path.display().to_string().cyan());
        }
        None => print!("{}", serde_yaml::to_string(config)?),
    }
    Ok(())
}

/// Print the last lines of the log file
fn cmd_logs(lines: usize) -> Result<()> {
    let log_path: PathBuf = get_log_path();
    let content =
        fs::read_to_string(&log_path).context(format!("Failed to read log file {}", log_path.display()))?;

    let all: Vec<&str> = content.lines().collect();
    let start = all.len().saturating_sub(lines);
    for line in &all[start..] {
        println!("{}", line);
    }
    Ok(())
}
