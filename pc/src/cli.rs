//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// Promptcraft - structured AI prompt editor
#[derive(Parser)]
#[command(
    name = "pc",
    about = "Compose structured AI prompts and export them as tagged text",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to the editor)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive prompt editor
    Edit,

    /// Build a prompt from flags and print its export document
    Render {
        /// Prompt name (required)
        #[arg(short, long, default_value = "")]
        name: String,

        /// What the AI should act as
        #[arg(short, long, default_value = "")]
        role: String,

        /// Background information
        #[arg(short = 'x', long, default_value = "")]
        context: String,

        /// Instruction step (repeatable, kept in order)
        #[arg(short = 'i', long = "instruction")]
        instructions: Vec<String>,

        /// Constraint (repeatable, kept in order)
        #[arg(short = 'k', long = "constraint")]
        constraints: Vec<String>,

        /// Verification mechanism (repeatable, kept in order)
        #[arg(short = 'v', long = "verification")]
        verification: Vec<String>,

        /// How the response should be structured
        #[arg(short = 'o', long, default_value = "")]
        output_format: String,

        /// Handlebars template overriding the export layout
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show or write the effective configuration
    Config {
        /// Write the effective configuration to this path instead of printing it
        #[arg(short, long)]
        write: Option<PathBuf>,
    },

    /// Show the editor log
    Logs {
        /// Number of lines to show
        #[arg(short = 'n', long, default_value = "50")]
        lines: usize,
    },
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptcraft")
        .join("logs")
        .join("promptcraft.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Output format for the render command
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["pc"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_edit() {
        let cli = Cli::parse_from(["pc", "edit"]);
        assert!(matches!(cli.command, Some(Command::Edit)));
    }

    #[test]
    fn test_cli_parse_render_lists_keep_order() {
        let cli = Cli::parse_from([
            "pc", "render", "--name", "Demo", "-i", "Do A", "-i", "Do B", "-k", "Be brief", "-v", "Cite sources",
        ]);
        if let Some(Command::Render {
            name,
            instructions,
            constraints,
            verification,
            format,
            template,
            ..
        }) = cli.command
        {
            assert_eq!(name, "Demo");
            assert_eq!(instructions, vec!["Do A", "Do B"]);
            assert_eq!(constraints, vec!["Be brief"]);
            assert_eq!(verification, vec!["Cite sources"]);
            assert_eq!(format, OutputFormat::Text);
            assert!(template.is_none());
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn test_cli_parse_render_defaults_to_empty_fields() {
        let cli = Cli::parse_from(["pc", "render"]);
        if let Some(Command::Render {
            name, role, context, ..
        }) = cli.command
        {
            assert!(name.is_empty());
            assert!(role.is_empty());
            assert!(context.is_empty());
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn test_cli_parse_render_json() {
        let cli = Cli::parse_from(["pc", "render", "-n", "x", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Some(Command::Render {
                format: OutputFormat::Json,
                ..
            })
        ));
    }

    #[test]
    fn test_cli_parse_logs() {
        let cli = Cli::parse_from(["pc", "logs", "-n", "10"]);
        assert!(matches!(cli.command, Some(Command::Logs { lines: 10 })));
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["pc", "-c", "/path/to/config.yml", "config"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
        assert!(matches!(cli.command, Some(Command::Config { write: None })));
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_log_path_location() {
        let path = get_log_path();
        assert!(path.ends_with("promptcraft/logs/promptcraft.log"));
    }
}
