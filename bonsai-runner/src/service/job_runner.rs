//! Job runner service
//!
//! Submits jobs through a [`JobApi`] and follows them with the poller until
//! they reach a terminal status. Progress is reported to a [`JobObserver`].

use std::future::Future;

use bonsai_client::{ClientError, JobApi};
use bonsai_core::domain::cluster::{NewickTree, SimilarSample, TypingMethod};
use bonsai_core::domain::job::{JobId, JobStatusEnvelope};
use bonsai_core::dto::cluster::{ClusterSamples, FindSimilar};
use bonsai_core::dto::job::SubmittedJob;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::RunnerConfig;
use crate::error::{Result, RunnerError};
use crate::scheduler::{CancelToken, PollOptions, poll};
use crate::service::observer::JobObserver;

/// Submits jobs and waits for their results
///
/// The runner holds no per-job state, so one instance can follow several
/// jobs concurrently.
pub struct JobRunner<A, O> {
    api: A,
    observer: O,
    options: PollOptions,
}

impl<A, O> JobRunner<A, O>
where
    A: JobApi,
    O: JobObserver,
{
    /// Creates a new job runner
    ///
    /// # Arguments
    /// * `api` - Client used to submit jobs and fetch their status
    /// * `observer` - Receives progress notifications
    /// * `config` - Polling interval and limits
    pub fn new(api: A, observer: O, config: &RunnerConfig) -> Self {
        Self {
            api,
            observer,
            options: config.poll_options(),
        }
    }

    pub fn poll_options(&self) -> &PollOptions {
        &self.options
    }

    /// Waits for a job to finish and returns its terminal status
    pub async fn wait_for(&self, job_id: &JobId, cancel: &CancelToken) -> Result<JobStatusEnvelope> {
        self.track(job_id, cancel, Ok).await
    }

    /// Waits for a job to finish and decodes its result payload
    pub async fn wait_for_result<T>(&self, job_id: &JobId, cancel: &CancelToken) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.track(job_id, cancel, |envelope| {
            envelope.result_as::<T>().map_err(ClientError::from)
        })
        .await
    }

    /// Clusters samples and returns the resulting tree
    pub async fn cluster(
        &self,
        typing_method: TypingMethod,
        req: ClusterSamples,
        cancel: &CancelToken,
    ) -> Result<NewickTree> {
        let job = self
            .submit(self.api.cluster_samples(typing_method, &req))
            .await?;
        self.wait_for_result(&job.id, cancel).await
    }

    /// Finds samples similar to a reference sample
    pub async fn find_similar(
        &self,
        sample_id: &str,
        req: FindSimilar,
        cancel: &CancelToken,
    ) -> Result<Vec<SimilarSample>> {
        if req.cluster {
            return Err(RunnerError::InvalidRequest(
                "clustered similarity searches return a tree, use find_similar_and_cluster"
                    .to_string(),
            ));
        }

        let job = self
            .submit(self.api.find_similar_samples(sample_id, &req))
            .await?;
        self.wait_for_result(&job.id, cancel).await
    }

    /// Finds samples similar to a reference sample and clusters them
    pub async fn find_similar_and_cluster(
        &self,
        sample_id: &str,
        req: FindSimilar,
        cancel: &CancelToken,
    ) -> Result<NewickTree> {
        if !req.cluster {
            return Err(RunnerError::InvalidRequest(
                "similarity search is not set up for clustering".to_string(),
            ));
        }

        let job = self
            .submit(self.api.find_similar_samples(sample_id, &req))
            .await?;
        self.wait_for_result(&job.id, cancel).await
    }

    async fn submit<F>(&self, request: F) -> Result<SubmittedJob>
    where
        F: Future<Output = bonsai_client::Result<SubmittedJob>>,
    {
        match request.await {
            Ok(job) => {
                info!(job_id = %job.id, task = %job.task, "job submitted");
                self.observer.on_submitted(&job);
                Ok(job)
            }
            Err(e) => {
                warn!("failed to submit job: {}", e);
                self.observer.on_failed(None, &e.to_string());
                Err(RunnerError::Submit(e))
            }
        }
    }

    async fn track<T, P>(&self, job_id: &JobId, cancel: &CancelToken, parse: P) -> Result<T>
    where
        P: FnOnce(JobStatusEnvelope) -> bonsai_client::Result<T>,
    {
        let mut attempts = 0;
        let outcome = poll(
            || self.api.job_status(job_id),
            |envelope| {
                attempts += 1;
                self.observer.on_progress(attempts, envelope);
                envelope.decision()
            },
            parse,
            &self.options,
            cancel,
        )
        .await;

        match &outcome {
            Ok(_) => {
                info!(%job_id, attempts, "job finished");
                self.observer.on_finished(job_id);
            }
            Err(e) => {
                warn!(%job_id, attempts, "job did not finish: {}", e);
                self.observer.on_failed(Some(job_id), &e.to_string());
            }
        }

        outcome.map_err(RunnerError::from)
    }
}
