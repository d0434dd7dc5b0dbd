//! Job status poller
//!
//! Repeatedly fetches a job's status until a decision function reports a
//! terminal state, then hands the final snapshot to a parser.
//!
//! Fetches never overlap: the wait before the next fetch only starts once the
//! previous fetch has returned, so one cycle takes fetch latency plus the
//! configured interval. The poller keeps no state beyond the loop itself and
//! several polls may run concurrently.

use std::future::Future;
use std::time::Duration;

use bonsai_core::domain::job::PollDecision;
use thiserror::Error;
use tokio::time::{self, Instant};
use tracing::debug;

use super::cancel::CancelToken;

/// Default wait between two fetches
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Poll loop settings
///
/// Both bounds are optional; without them a poll runs until the decision
/// function reports a terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    /// Wait between the end of one fetch and the start of the next
    pub interval: Duration,
    /// Maximum number of fetches
    pub max_attempts: Option<u32>,
    /// Maximum time from the first fetch until the loop gives up
    pub timeout: Option<Duration>,
}

impl PollOptions {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
            timeout: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

/// Reasons a poll ends without a parsed result
#[derive(Debug, Error)]
pub enum PollError<E> {
    /// Fetching the status failed; the fetch error is returned as is
    #[error(transparent)]
    Fetch(E),

    /// The job reached a terminal failure
    #[error("{0}")]
    JobFailed(String),

    /// The terminal snapshot could not be turned into a result
    #[error("failed to parse job result: {0}")]
    Parse(#[source] E),

    /// The cancel token fired
    #[error("polling cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },

    /// The attempt or duration limit was reached while the job was still running
    #[error("polling timed out after {attempts} attempt(s) ({elapsed:?})")]
    TimedOut { attempts: u32, elapsed: Duration },

    #[error("poll interval must be greater than zero")]
    InvalidInterval,
}

impl<E> PollError<E> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PollError::Cancelled { .. })
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, PollError::TimedOut { .. })
    }
}

enum Fetched<S, E> {
    Done(Result<S, E>),
    Cancelled,
    Expired,
}

/// Polls until `decide` reports a terminal state
///
/// 1. `fetch` is called once right away.
/// 2. While `decide` returns [`PollDecision::Continue`], the loop sleeps for
///    `options.interval` and fetches again.
/// 3. On [`PollDecision::Finished`], `parse` is called exactly once with the
///    final snapshot and its value is returned.
///
/// [`PollDecision::Failed`] ends the loop with [`PollError::JobFailed`] and
/// `parse` is never called. A fetch error aborts the loop immediately and is
/// not retried.
///
/// # Example
/// ```no_run
/// # use bonsai_runner::scheduler::{CancelToken, PollOptions, poll};
/// # use bonsai_client::BonsaiClient;
/// # use bonsai_core::domain::job::JobId;
/// # async fn example() -> anyhow::Result<()> {
/// let client = BonsaiClient::new("http://localhost:8000");
/// let job_id = JobId::from("a1b2c3");
///
/// let tree: String = poll(
///     || client.job_status(&job_id),
///     |envelope| envelope.decision(),
///     |envelope| envelope.result_as::<String>().map_err(Into::into),
///     &PollOptions::default(),
///     &CancelToken::new(),
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn poll<S, T, E, F, Fut, D, P>(
    mut fetch: F,
    mut decide: D,
    parse: P,
    options: &PollOptions,
    cancel: &CancelToken,
) -> Result<T, PollError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<S, E>>,
    D: FnMut(&S) -> PollDecision,
    P: FnOnce(S) -> Result<T, E>,
{
    if options.interval.is_zero() {
        return Err(PollError::InvalidInterval);
    }

    let started = Instant::now();
    let deadline = options
        .timeout
        .and_then(|timeout| started.checked_add(timeout));
    let mut attempts: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(PollError::Cancelled { attempts });
        }

        attempts += 1;
        let snapshot = match fetch_once(fetch(), cancel, deadline).await {
            Fetched::Done(Ok(snapshot)) => snapshot,
            Fetched::Done(Err(e)) => return Err(PollError::Fetch(e)),
            Fetched::Cancelled => return Err(PollError::Cancelled { attempts }),
            Fetched::Expired => {
                return Err(PollError::TimedOut {
                    attempts,
                    elapsed: started.elapsed(),
                });
            }
        };

        let decision = decide(&snapshot);
        debug!(attempt = attempts, ?decision, "polled job status");

        match decision {
            PollDecision::Finished => return parse(snapshot).map_err(PollError::Parse),
            PollDecision::Failed(reason) => return Err(PollError::JobFailed(reason)),
            PollDecision::Continue => {}
        }

        let out_of_attempts = options.max_attempts.is_some_and(|max| attempts >= max);
        let out_of_time = deadline.is_some_and(|deadline| {
            deadline.saturating_duration_since(Instant::now()) <= options.interval
        });
        if out_of_attempts || out_of_time {
            return Err(PollError::TimedOut {
                attempts,
                elapsed: started.elapsed(),
            });
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PollError::Cancelled { attempts }),
            _ = time::sleep(options.interval) => {}
        }
    }
}

/// Runs one fetch, racing it against cancellation and the deadline
async fn fetch_once<S, E, Fut>(
    fut: Fut,
    cancel: &CancelToken,
    deadline: Option<Instant>,
) -> Fetched<S, E>
where
    Fut: Future<Output = Result<S, E>>,
{
    let bounded = async {
        match deadline {
            Some(deadline) => time::timeout_at(deadline, fut).await.ok(),
            None => Some(fut.await),
        }
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Fetched::Cancelled,
        result = bounded => match result {
            Some(result) => Fetched::Done(result),
            None => Fetched::Expired,
        },
    }
}
