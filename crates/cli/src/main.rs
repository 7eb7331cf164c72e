//! Factcheck CLI
//!
//! Main entry point for the factcheck command-line tool.
//! Verifies claims and extracts typed fields against caller-supplied context.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use commands::{
    CheckCommand, CompareCommand, EvaluateCommand, ExtractCommand, PromptsCommand,
};
use factcheck_core::{config::AppConfig, logging};
use std::path::PathBuf;

/// Factcheck CLI - grounded fact verification and structured extraction
#[derive(Parser, Debug)]
#[command(name = "factcheck")]
#[command(about = "Grounded fact verification and structured extraction", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "FACTCHECK_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "FACTCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// LLM provider (ollama, openai)
    #[arg(short, long, global = true, env = "FACTCHECK_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "FACTCHECK_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a question from context and score the answer
    Check(CheckCommand),

    /// Extract typed fields from context
    Extract(ExtractCommand),

    /// Evaluate the model against a labelled dataset
    Evaluate(EvaluateCommand),

    /// Compare two evaluation reports
    Compare(CompareCommand),

    /// List available prompt definitions
    Prompts(PromptsCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment and the workspace config file
    let mut config = AppConfig::load()?;

    // A config file passed on the command line is merged over the defaults
    if let Some(path) = &cli.config {
        if config.config_file.as_ref() != Some(path) {
            config = config
                .merge_yaml(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?;
        }
    }

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color, cli.log_json)?;

    // Log startup
    tracing::info!("Factcheck CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Check(_) => "check",
        Commands::Extract(_) => "extract",
        Commands::Evaluate(_) => "evaluate",
        Commands::Compare(_) => "compare",
        Commands::Prompts(_) => "prompts",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Check(cmd) => cmd.execute(&config).await,
        Commands::Extract(cmd) => cmd.execute(&config).await,
        Commands::Evaluate(cmd) => cmd.execute(&config).await,
        Commands::Compare(cmd) => cmd.execute(),
        Commands::Prompts(cmd) => cmd.execute(&config),
    };

    // Log completion
    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {:#}", e),
    }

    result
}
