//! ALP Harness CLI
//!
//! Command-line interface for validating loop configurations and recording
//! termination events.

use alp_harness::{validate, AlpConfig, Result, TerminationLogger, TerminationLoggerConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "alp")]
#[command(about = "Adaptive learning process harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file and print the normalized result
    Validate {
        /// Path to a JSON configuration file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the default configuration
    Config,

    /// Record a loop termination event
    Log {
        /// Termination reason (max_iterations, performance_threshold,
        /// manual_stop, error, unknown)
        #[arg(short, long)]
        reason: String,

        /// Number of iterations completed before termination
        #[arg(short, long)]
        iterations: u64,

        /// Performance metrics as a JSON object
        #[arg(short, long)]
        metrics: Option<String>,

        /// Additional context as a JSON object
        #[arg(short, long)]
        context: Option<String>,

        /// Directory for termination records
        #[arg(long, default_value = "logs")]
        log_dir: PathBuf,

        /// Skip the console summary line
        #[arg(long)]
        no_console: bool,

        /// Skip the rolling text log
        #[arg(long)]
        no_file: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Validate { file } => run_validate(file),
        Commands::Config => {
            println!(
                "{}",
                serde_json::to_string_pretty(&AlpConfig::default()).expect("default serializes")
            );
            Ok(())
        }
        Commands::Log {
            reason,
            iterations,
            metrics,
            context,
            log_dir,
            no_console,
            no_file,
        } => run_log(
            reason, iterations, metrics, context, log_dir, no_console, no_file,
        ),
    }
}

fn run_validate(file: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&file)
        .map_err(|e| alp_harness::Error::InvalidArgument(format!("{}: {}", file.display(), e)))?;
    let raw: serde_json::Value = serde_json::from_str(&content)?;

    let config = validate(raw)?;

    tracing::info!(
        algorithm = config.learning_algorithm.name(),
        max_iterations = config.iteration_config.max_iterations,
        "Configuration is valid"
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&config).expect("validated config serializes")
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_log(
    reason: String,
    iterations: u64,
    metrics: Option<String>,
    context: Option<String>,
    log_dir: PathBuf,
    no_console: bool,
    no_file: bool,
) -> Result<()> {
    use alp_harness::TerminationReason;

    let reason = match reason.to_lowercase().as_str() {
        "max_iterations" => TerminationReason::MaxIterations,
        "performance_threshold" => TerminationReason::PerformanceThreshold,
        "manual_stop" => TerminationReason::ManualStop,
        "error" => TerminationReason::Error,
        "unknown" => TerminationReason::Unknown,
        other => {
            return Err(alp_harness::Error::InvalidArgument(format!(
                "Unknown termination reason: {}",
                other
            )));
        }
    };

    let metrics = match metrics {
        Some(raw) => serde_json::from_str(&raw)?,
        None => serde_json::Map::new(),
    };
    let context = match context {
        Some(raw) => Some(serde_json::from_str(&raw)?),
        None => None,
    };

    let logger = TerminationLogger::new(TerminationLoggerConfig {
        log_dir,
        log_to_console: !no_console,
        log_to_file: !no_file,
    })?;

    let record_path = logger.log_termination(reason, iterations, metrics, context)?;
    println!("Recorded termination event: {}", record_path.display());
    Ok(())
}
