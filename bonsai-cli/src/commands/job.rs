//! Job command handlers
//!
//! Looks up the status of a submitted job or waits for it to finish.

use anyhow::{Context, Result};
use bonsai_client::BonsaiClient;
use bonsai_core::domain::job::{JobId, JobStatusEnvelope};
use bonsai_runner::{CancelToken, JobRunner};
use clap::Subcommand;
use colored::*;

use crate::config::Config;
use crate::progress::{TerminalObserver, colorize_status};

/// Job subcommands
#[derive(Subcommand)]
pub enum JobCommands {
    /// Show the current status of a job
    Status {
        /// Job ID
        id: String,
    },
    /// Wait for a job to finish and print its result
    Wait {
        /// Job ID
        id: String,
    },
}

/// Handle job commands
pub async fn handle_job_command(
    command: JobCommands,
    config: &Config,
    runner: &JobRunner<BonsaiClient, TerminalObserver>,
    cancel: &CancelToken,
) -> Result<()> {
    match command {
        JobCommands::Status { id } => show_status(&config.client(), &JobId::from(id)).await,
        JobCommands::Wait { id } => wait_for_job(runner, &JobId::from(id), cancel).await,
    }
}

/// Fetch and display a single status snapshot
async fn show_status(client: &BonsaiClient, job_id: &JobId) -> Result<()> {
    let envelope = client
        .job_status(job_id)
        .await
        .with_context(|| format!("Failed to fetch status of job {}", job_id))?;

    print_job_details(job_id, &envelope);

    Ok(())
}

/// Poll a job until it finishes and print its result
async fn wait_for_job(
    runner: &JobRunner<BonsaiClient, TerminalObserver>,
    job_id: &JobId,
    cancel: &CancelToken,
) -> Result<()> {
    let envelope = runner.wait_for(job_id, cancel).await?;

    match &envelope.result {
        Some(result) => println!("{}", serde_json::to_string_pretty(result)?),
        None => println!("{}", "Job finished without a result.".yellow()),
    }

    Ok(())
}

/// Print detailed job information
fn print_job_details(job_id: &JobId, envelope: &JobStatusEnvelope) {
    println!("{}", "Job Details:".bold());
    println!("  ID:        {}", job_id.to_string().cyan());
    println!("  Status:    {}", colorize_status(&envelope.status));

    if let Some(queue) = &envelope.queue {
        println!("  Queue:     {}", queue);
    }

    if let Some(task) = &envelope.task {
        println!("  Task:      {}", task.dimmed());
    }

    if let Some(submitted) = envelope.submitted_at {
        println!("  Submitted: {}", submitted.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(started) = envelope.started_at {
        println!("  Started:   {}", started.format("%Y-%m-%d %H:%M:%S"));
    }

    if let Some(finished) = envelope.finished_at {
        println!("  Finished:  {}", finished.format("%Y-%m-%d %H:%M:%S"));

        if let Some(started) = envelope.started_at {
            let duration = finished.signed_duration_since(started);
            println!("  Duration:  {}s", duration.num_seconds());
        }
    }

    if let Some(result) = &envelope.result {
        println!("\n{}", "Result:".bold());
        match serde_json::to_string_pretty(result) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{:?}", result),
        }
    }
}
