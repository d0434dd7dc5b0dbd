//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod cluster;
mod job;
mod similar;

pub use cluster::ClusterArgs;
pub use job::JobCommands;
pub use similar::SimilarArgs;

use anyhow::Result;
use bonsai_runner::{CancelToken, JobRunner};
use clap::Subcommand;

use crate::config::Config;
use crate::progress::TerminalObserver;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or wait for submitted jobs
    Job {
        #[command(subcommand)]
        command: JobCommands,
    },
    /// Cluster samples on a typing result and print the tree
    Cluster(ClusterArgs),
    /// Find samples similar to a reference sample
    Similar(SimilarArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
/// * `cancel` - Cancels any poll in progress when triggered
pub async fn handle_command(command: Commands, config: &Config, cancel: &CancelToken) -> Result<()> {
    let runner = JobRunner::new(config.client(), TerminalObserver::default(), &config.runner);

    match command {
        Commands::Job { command } => job::handle_job_command(command, config, &runner, cancel).await,
        Commands::Cluster(args) => cluster::handle_cluster_command(args, &runner, cancel).await,
        Commands::Similar(args) => similar::handle_similar_command(args, &runner, cancel).await,
    }
}
