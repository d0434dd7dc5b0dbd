//! Job progress observer
//!
//! Presentation concerns (spinners, notifications, progress lines) are kept
//! out of the runner and reached through this trait.

use bonsai_core::domain::job::{JobId, JobStatusEnvelope};
use bonsai_core::dto::job::SubmittedJob;

/// Receives progress notifications for a tracked job
///
/// Every tracked run ends with exactly one call to either
/// [`on_finished`](JobObserver::on_finished) or
/// [`on_failed`](JobObserver::on_failed), so teardown placed there always runs.
pub trait JobObserver: Send + Sync {
    /// A job was accepted by the API
    fn on_submitted(&self, _job: &SubmittedJob) {}

    /// A status snapshot was fetched, `attempt` starts at 1
    fn on_progress(&self, _attempt: u32, _envelope: &JobStatusEnvelope) {}

    /// The job finished and its result was extracted
    fn on_finished(&self, _job_id: &JobId) {}

    /// The run failed; `job_id` is `None` when submission itself failed
    fn on_failed(&self, _job_id: Option<&JobId>, _message: &str) {}
}

/// Observer that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl JobObserver for NoopObserver {}
