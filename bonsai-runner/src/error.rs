//! Error types for the job runner

use bonsai_client::ClientError;
use thiserror::Error;

use crate::scheduler::PollError;

/// Result type alias for runner operations
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Errors that can occur while submitting or tracking a job
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The job could not be submitted
    #[error("failed to submit job: {0}")]
    Submit(#[source] ClientError),

    /// Tracking the submitted job failed
    #[error(transparent)]
    Poll(#[from] PollError<ClientError>),

    /// The request does not fit the operation it was passed to
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl RunnerError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunnerError::Poll(e) if e.is_cancelled())
    }

    /// True when the job itself reported a failure
    pub fn is_job_failure(&self) -> bool {
        matches!(self, RunnerError::Poll(PollError::JobFailed(_)))
    }
}
