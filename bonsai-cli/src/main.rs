//! Bonsai CLI
//!
//! Command-line interface for submitting Bonsai jobs and following them
//! until they finish.

mod commands;
mod config;
mod progress;

use std::time::Duration;

use anyhow::Result;
use bonsai_runner::{CancelToken, RunnerConfig};
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bonsai")]
#[command(about = "Submit and follow Bonsai clustering jobs", long_about = None)]
struct Cli {
    /// Bonsai API URL
    #[arg(long, env = "BONSAI_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Bearer token for the API
    #[arg(long, env = "BONSAI_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Milliseconds to wait between two status checks
    #[arg(long, env = "BONSAI_POLL_INTERVAL_MS", default_value_t = 2000)]
    interval_ms: u64,

    /// Give up after this many status checks
    #[arg(long, env = "BONSAI_POLL_MAX_ATTEMPTS")]
    max_attempts: Option<u32>,

    /// Give up after polling a job for this many seconds
    #[arg(long, env = "BONSAI_POLL_TIMEOUT")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bonsai_cli=info,bonsai_runner=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let runner = RunnerConfig::new(cli.api_url)
        .with_poll_interval(Duration::from_millis(cli.interval_ms))
        .with_max_attempts(cli.max_attempts)
        .with_poll_timeout(cli.timeout_secs.map(Duration::from_secs));
    let config = Config::new(runner, cli.token)?;

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling");
                cancel.cancel();
            }
        });
    }

    handle_command(cli.command, &config, &cancel).await
}
