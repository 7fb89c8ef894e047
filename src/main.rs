//! CLI entry point for AQUA (Air Quality Analytics).
//!
//! Starts the interactive menu for historical reporting and live monitoring.
//! Flags only configure the environment; all work happens through the menu.

use anyhow::{Context, Result};
use aqua_monitor::config::AppConfig;
use aqua_monitor::fetch::BasicClient;
use aqua_monitor::shell::Shell;
use clap::Parser;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "aqua_monitor")]
#[command(about = "Explore historical and live London air-quality readings", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory containing the station CSV tables
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Root URL of the LondonAir API
    #[arg(long)]
    api_base_url: Option<String>,

    /// Live request timeout in seconds (no timeout when unset)
    #[arg(short, long)]
    timeout_secs: Option<u64>,

    /// Invalid answers tolerated per prompt
    #[arg(short, long)]
    max_attempts: Option<usize>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/aqua_monitor.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("aqua_monitor.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli)?;
    debug!(?config, "Configuration resolved");

    let client = BasicClient::new(config.request_timeout())?;

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), client, config);
    shell.run()?;

    info!("Goodbye");
    Ok(())
}

/// Merges the JSON file, `AQUA_*` variables and flags, in that order.
fn resolve_config(cli: Cli) -> Result<AppConfig> {
    let base = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    let mut config = base.apply_env()?;

    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(url) = cli.api_base_url {
        config.api_base_url = url;
    }
    if let Some(secs) = cli.timeout_secs {
        config.request_timeout_secs = Some(secs);
    }
    if let Some(attempts) = cli.max_attempts {
        config.max_attempts = attempts;
    }

    Ok(config.validated()?)
}
