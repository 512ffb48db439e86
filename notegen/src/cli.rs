//! Command-line interface definitions for notegen

use clap::{Args, Parser, Subcommand};
use notegen::app_config::CONFIG_FILE_NAME;
use std::path::PathBuf;

/// CLI structure for the notegen application
#[derive(Parser)]
#[command(name = "notegen")]
#[command(version)]
#[command(about = "Generate programming notes as HTML and Word documents", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Output options shared by `generate` and `render`
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory the .docx file is saved into (overrides notegen.toml)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Also write a standalone HTML preview page to this path
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Skip the Word document export
    #[arg(long)]
    pub no_docx: bool,

    /// Configuration file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Available subcommands for notegen
#[derive(Subcommand)]
pub enum Commands {
    /// Request notes from the backend and export them
    Generate {
        /// Programming language, e.g. Python
        #[arg(short, long)]
        language: String,

        /// Topic within the language, e.g. Loops
        #[arg(short, long)]
        topic: String,

        /// Backend endpoint URL (overrides notegen.toml)
        #[arg(short, long)]
        endpoint: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render a saved backend response without contacting the backend
    Render {
        /// JSON file holding a backend response
        #[arg(value_name = "RESPONSE")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write a default notegen.toml
    InitConfig {
        /// Where to write the file
        #[arg(value_name = "PATH", default_value = CONFIG_FILE_NAME)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "notegen", "generate", "-l", "Python", "-t", "Loops", "--no-docx", "--html",
            "out.html",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                language,
                topic,
                endpoint,
                output,
            } => {
                assert_eq!(language, "Python");
                assert_eq!(topic, "Loops");
                assert_eq!(endpoint, None);
                assert!(output.no_docx);
                assert_eq!(output.html, Some(PathBuf::from("out.html")));
                assert_eq!(output.config, PathBuf::from(CONFIG_FILE_NAME));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_generate_requires_topic() {
        assert!(Cli::try_parse_from(["notegen", "generate", "-l", "Python"]).is_err());
    }

    #[test]
    fn test_init_config_defaults_to_config_file_name() {
        let cli = Cli::try_parse_from(["notegen", "init-config"]).unwrap();

        match cli.command {
            Commands::InitConfig { path, force } => {
                assert_eq!(path, PathBuf::from(CONFIG_FILE_NAME));
                assert!(!force);
            }
            _ => panic!("expected init-config"),
        }
    }

    #[test]
    fn test_parse_render() {
        let cli =
            Cli::try_parse_from(["notegen", "render", "response.json", "-o", "exports"]).unwrap();

        match cli.command {
            Commands::Render { input, output } => {
                assert_eq!(input, PathBuf::from("response.json"));
                assert_eq!(output.output_dir, Some(PathBuf::from("exports")));
            }
            _ => panic!("expected render"),
        }
    }
}
