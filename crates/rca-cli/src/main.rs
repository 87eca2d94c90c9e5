//! RCA Agent CLI
//!
//! The `rca-agent` command sends an incident log to a local Ollama model and
//! prints a validated Root Cause Analysis report.
//!
//! ## Commands
//!
//! - `analyze`: Analyze a log file (default when no command is given)
//! - `schema`: Print the JSON Schema the model is asked to follow

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rca_core::config::{DEFAULT_INPUT, DEFAULT_MODEL, DEFAULT_OLLAMA_HOST};
use rca_core::{
    print_report, AnalysisConfig, Analyzer, ChatBackend, OllamaClient, OllamaConfig, RcaError,
    RootCauseAnalysis,
};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "rca-agent")]
#[command(author = "Stevedores Org")]
#[command(version = rca_core::VERSION)]
#[command(about = "Root Cause Analysis of incident logs with a local LLM", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an incident log and print the RCA report
    Analyze(AnalyzeArgs),

    /// Print the JSON Schema of the RCA report
    Schema,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Incident log file to analyze
    #[arg(short, long, env = "RCA_INPUT", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Ollama model identifier
    #[arg(short, long, env = "RCA_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Ollama server URL
    #[arg(long, env = "OLLAMA_HOST", default_value = DEFAULT_OLLAMA_HOST)]
    host: String,

    /// Abort the inference call after this many seconds (default: wait indefinitely)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: Option<u64>,
}

impl AnalyzeArgs {
    fn into_config(self) -> AnalysisConfig {
        let mut ollama = OllamaConfig::new(&self.host);
        if let Some(secs) = self.timeout_secs {
            ollama = ollama.with_timeout(Duration::from_secs(secs));
        }

        AnalysisConfig::default()
            .with_input(self.input)
            .with_model(&self.model)
            .with_ollama(ollama)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    init_tracing(cli.json, level);

    match cli.command {
        Some(Commands::Schema) => cmd_schema(),
        Some(Commands::Analyze(args)) => cmd_analyze(args.into_config()).await,
        None => cmd_analyze(AnalysisConfig::from_env()).await,
    }
}

/// Install the global subscriber. Log lines go to stderr; stdout is reserved
/// for progress lines and the report. `RUST_LOG` overrides `level`.
fn init_tracing(json: bool, level: Level) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = if json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

fn cmd_schema() -> Result<ExitCode> {
    let schema = RootCauseAnalysis::json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(ExitCode::SUCCESS)
}

async fn cmd_analyze(config: AnalysisConfig) -> Result<ExitCode> {
    let backend =
        OllamaClient::new(config.ollama.clone()).context("Failed to create Ollama client")?;
    let analyzer = Analyzer::new(config, backend).context("Failed to build prompts")?;

    match analyze_log(&analyzer).await? {
        Some(rca) => {
            print_report(&rca)?;
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}

/// Run the pipeline, reporting the two recognized failure kinds to the
/// operator. Anything else propagates.
async fn analyze_log<B: ChatBackend>(analyzer: &Analyzer<B>) -> Result<Option<RootCauseAnalysis>> {
    let config = analyzer.config();
    println!("READING LOG: {}...", config.input_path.display());

    let log = match analyzer.load() {
        Ok(log) => log,
        Err(RcaError::InputNotFound { path }) => {
            println!("ERROR: Could not find file {}", path.display());
            return Ok(None);
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read {}", config.input_path.display()))
        }
    };

    println!("ANALYZING LOCALLY with {}...", config.model);

    match analyzer.analyze(&log).await {
        Ok(rca) => Ok(Some(rca)),
        Err(RcaError::Validation(violation)) => {
            println!("\n JSON VALIDATION ERROR: {}", violation);
            println!("Raw Output received from LLM:\n{}", violation.raw);
            Ok(None)
        }
        Err(err) => Err(err).context("Inference call failed"),
    }
}
