//! Structura CLI
//!
//! Turns PDF extraction archives into heading-scoped chunks, raw structure
//! or flat artifact documents.

mod commands;

use clap::{Parser, Subcommand};
use commands::{InspectCommand, ParseCommand};
use std::path::PathBuf;
use structura_core::{
    config::AppConfig,
    logging::{self, LogFormat},
    AppResult,
};

/// Structura - rebuild document structure from PDF extraction archives
#[derive(Parser, Debug)]
#[command(name = "structura")]
#[command(about = "Rebuild document structure from PDF extraction archives", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "STRUCTURA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse archives into documents
    Parse(ParseCommand),

    /// Show archive entries and structure statistics
    Inspect(InspectCommand),
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_with(cli.config.as_deref())?.with_overrides(
        None,
        None,
        cli.log_level,
        cli.verbose,
        cli.no_color,
        cli.log_json,
    );

    let format = if config.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    logging::init_logging(config.log_level.as_deref(), config.no_color, format)?;

    tracing::debug!("Mode: {}", config.mode);
    tracing::debug!("Embed figures: {}", config.embed_figures);

    let command_name = match &cli.command {
        Commands::Parse(_) => "parse",
        Commands::Inspect(_) => "inspect",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match &cli.command {
        Commands::Parse(cmd) => cmd.execute(&config),
        Commands::Inspect(cmd) => cmd.execute(),
    };

    match &result {
        Ok(_) => tracing::debug!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
