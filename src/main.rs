//! Web-Analyzer main entry point
//!
//! This is the command-line interface for the Web-Analyzer page summariser.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use web_analyzer::config::{load_config_with_hash, Config};
use web_analyzer::output::{render_json, render_text, OutputFormat};
use web_analyzer::{AnalysisRequest, Analyzer, AnalyzerError};

/// Web-Analyzer: structural summary of a single web page
///
/// Fetches one page and reports its document version, title, heading counts,
/// internal and external link counts, whether it carries a login form, and
/// how many of its external links are reachable.
#[derive(Parser, Debug)]
#[command(name = "web-analyzer")]
#[command(version)]
#[command(about = "Structural summary of a single web page", long_about = None)]
struct Cli {
    /// Page to analyze
    #[arg(value_name = "URL", required_unless_present = "request")]
    url: Option<String>,

    /// Read a `{"url": ...}` request envelope from FILE (`-` for stdin)
    #[arg(long, value_name = "FILE", conflicts_with = "url")]
    request: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG", env = "WEB_ANALYZER_CONFIG")]
    config: Option<PathBuf>,

    /// Skip liveness probing of external links
    #[arg(long)]
    no_probe: bool,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: OutputFormat,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::from(exit_code_for(&e))
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("web_analyzer=info,warn"),
            1 => EnvFilter::new("web_analyzer=debug,info"),
            2 => EnvFilter::new("web_analyzer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Maps a failure onto the process exit status
fn exit_code_for(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<AnalyzerError>() {
        Some(AnalyzerError::InvalidInput(_)) => 2,
        Some(AnalyzerError::Fetch { .. }) => 3,
        Some(AnalyzerError::Parse { .. }) => 4,
        Some(AnalyzerError::Cancelled { .. }) => 130,
        _ => 1,
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let request = match (&cli.request, &cli.url) {
        (Some(path), _) => read_request(path)?,
        (None, Some(url)) => AnalysisRequest::new(url.as_str()),
        (None, None) => anyhow::bail!("no URL given"),
    };

    let analyzer = Analyzer::new(config)?;
    let target = request.target(analyzer.validator()).map_err(AnalyzerError::from)?;

    let mut options = analyzer.default_options();
    if cli.no_probe {
        options.enable_liveness_probe = false;
    }

    let cancel = CancellationToken::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, cancelling analysis");
            watcher.cancel();
        }
    });

    let result = analyzer
        .analyze_with_cancel(&target, options, &cancel)
        .await?;

    let rendered = match cli.format {
        OutputFormat::Json => render_json(&result, cli.pretty)?,
        OutputFormat::Text => render_text(&result, &target),
    };
    println!("{}", rendered.trim_end());

    Ok(())
}

/// Reads the request envelope from a file, or stdin for `-`
fn read_request(path: &Path) -> Result<AnalysisRequest> {
    let payload = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request {}", path.display()))?
    };

    AnalysisRequest::from_json(&payload).context("Malformed request envelope")
}
