//! Terminal progress reporting

use std::sync::Mutex;

use bonsai_core::domain::job::{JobId, JobStatus, JobStatusEnvelope};
use bonsai_core::dto::job::SubmittedJob;
use bonsai_runner::JobObserver;
use colored::*;

/// Prints job progress to stderr
///
/// A status line is only printed when the status changes.
#[derive(Default)]
pub struct TerminalObserver {
    last_status: Mutex<Option<JobStatus>>,
}

impl TerminalObserver {
    /// Remembers `status`, returning true when it differs from the last one seen
    fn record_status(&self, status: &JobStatus) -> bool {
        let mut last = self
            .last_status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if last.as_ref() == Some(status) {
            return false;
        }
        *last = Some(status.clone());
        true
    }
}

impl JobObserver for TerminalObserver {
    fn on_submitted(&self, job: &SubmittedJob) {
        eprintln!(
            "{} Submitted job {} ({})",
            "▸".cyan(),
            job.id.to_string().bold(),
            job.task.dimmed()
        );
    }

    fn on_progress(&self, attempt: u32, envelope: &JobStatusEnvelope) {
        if !self.record_status(&envelope.status) {
            return;
        }
        eprintln!(
            "  {} {} {}",
            format!("[{}]", attempt).dimmed(),
            "Status:".dimmed(),
            colorize_status(&envelope.status)
        );
    }

    fn on_finished(&self, job_id: &JobId) {
        eprintln!("{} Job {} finished", "✓".green(), job_id);
    }

    fn on_failed(&self, job_id: Option<&JobId>, message: &str) {
        match job_id {
            Some(job_id) => eprintln!("{} Job {}: {}", "✗".red(), job_id, message.red()),
            None => eprintln!("{} {}", "✗".red(), message.red()),
        }
    }
}

/// Colorize job status for display
pub fn colorize_status(status: &JobStatus) -> ColoredString {
    let status_str = status.as_str();
    match status {
        JobStatus::Queued | JobStatus::Deferred | JobStatus::Scheduled => status_str.yellow(),
        JobStatus::Started => status_str.cyan(),
        JobStatus::Finished => status_str.green(),
        JobStatus::Failed => status_str.red(),
        JobStatus::Stopped | JobStatus::Canceled => status_str.dimmed(),
        JobStatus::Other(_) => status_str.normal(),
    }
}
