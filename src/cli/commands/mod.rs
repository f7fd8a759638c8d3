//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod analyze;
mod check;
mod config_cmd;
mod poll;
mod process;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "docsense")]
#[command(about = "Upload a document, wait for OCR, and review its risk analysis")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the API (overrides config file)
    #[arg(long, global = true, env = "DOCSENSE_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a file would be accepted for upload
    Check {
        /// Files to check (only the first one is considered, like a drop)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Upload a document, wait for text extraction, and show its analysis
    Process {
        /// Files to process (only the first one is considered, like a drop)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print the analysis as JSON instead of a formatted panel
        #[arg(long)]
        json: bool,
    },

    /// Poll a results location until extracted text is available
    Poll {
        /// Results location (absolute URL or path relative to the base URL)
        results_url: String,
    },

    /// Request an analysis for already-extracted text
    Analyze {
        /// Text file to analyze, or `-` for stdin
        input: PathBuf,
        /// Print the analysis as JSON instead of a formatted panel
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).await?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    match cli.command {
        Commands::Check { files } => check::cmd_check(&config, &files).await,
        Commands::Process { files, json } => process::cmd_process(&config, &files, json).await,
        Commands::Poll { results_url } => poll::cmd_poll(&config, &results_url).await,
        Commands::Analyze { input, json } => analyze::cmd_analyze(&config, &input, json).await,
        Commands::Config => config_cmd::cmd_config(&config),
    }
}
