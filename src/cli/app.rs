//! Main CLI application structure

use clap::{Parser, Subcommand};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

use super::output::{Output, OutputFormat};
use super::{analyze, extract, input};
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "taskdraft")]
#[command(author, version, about = "Extract tasks and dependencies from project documents")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured default_format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract task candidates and dependencies from a document
    Extract {
        /// Document path, or - for stdin
        file: String,

        /// Declared content type (MIME type or extension)
        #[arg(long = "type", value_name = "MIME")]
        content_type: Option<String>,
    },

    /// Extract tasks and synthesize recommendations
    Analyze {
        /// Document path, or - for stdin
        file: String,

        /// Declared content type (MIME type or extension)
        #[arg(long = "type", value_name = "MIME")]
        content_type: Option<String>,
    },

    /// Run the lexical classifiers on a single span of text
    Classify {
        /// Text to classify
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Print extracted tasks with prerequisites first
    Order {
        /// Document path, or - for stdin
        file: String,

        /// Declared content type (MIME type or extension)
        #[arg(long = "type", value_name = "MIME")]
        content_type: Option<String>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    init_tracing(cli.verbose, &config.global.log_level);

    let format = cli.format.unwrap_or_else(|| config.global.default_format.into());
    let output = Output::new(format);

    if let Some(root) = &config.project_root {
        tracing::debug!("Using project config at {}", root.display());
    }

    match cli.command {
        Commands::Extract { file, content_type } => {
            let doc = input::read_document(&file, content_type.as_deref(), &config.project)?;
            extract::extract(&output, &doc)?
        }

        Commands::Analyze { file, content_type } => {
            let doc = input::read_document(&file, content_type.as_deref(), &config.project)?;
            analyze::analyze(&output, &doc)?
        }

        Commands::Classify { text } => analyze::classify(&output, &text.join(" "))?,

        Commands::Order { file, content_type } => {
            let doc = input::read_document(&file, content_type.as_deref(), &config.project)?;
            extract::order(&output, &doc)?
        }
    }

    Ok(())
}

/// Installs the stderr log subscriber
///
/// RUST_LOG wins, then --verbose, then the configured level.
fn init_tracing(verbose: bool, level: &str) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ if verbose => EnvFilter::new("debug"),
        _ => EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
