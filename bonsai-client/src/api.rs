//! Trait seam over the job endpoints
//!
//! The job runner depends on [`JobApi`] rather than on [`BonsaiClient`]
//! directly so it can be driven by an in-memory fake.

use async_trait::async_trait;
use bonsai_core::domain::cluster::TypingMethod;
use bonsai_core::domain::job::{JobId, JobStatusEnvelope};
use bonsai_core::dto::cluster::{ClusterSamples, FindSimilar};
use bonsai_core::dto::job::SubmittedJob;

use crate::BonsaiClient;
use crate::error::Result;

/// Operations needed to submit and track jobs
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Fetch one status snapshot for a job
    async fn job_status(&self, job_id: &JobId) -> Result<JobStatusEnvelope>;

    /// Submit a clustering job
    async fn cluster_samples(
        &self,
        typing_method: TypingMethod,
        req: &ClusterSamples,
    ) -> Result<SubmittedJob>;

    /// Submit a similarity search
    async fn find_similar_samples(&self, sample_id: &str, req: &FindSimilar)
    -> Result<SubmittedJob>;
}

#[async_trait]
impl JobApi for BonsaiClient {
    async fn job_status(&self, job_id: &JobId) -> Result<JobStatusEnvelope> {
        BonsaiClient::job_status(self, job_id).await
    }

    async fn cluster_samples(
        &self,
        typing_method: TypingMethod,
        req: &ClusterSamples,
    ) -> Result<SubmittedJob> {
        BonsaiClient::cluster_samples(self, typing_method, req).await
    }

    async fn find_similar_samples(
        &self,
        sample_id: &str,
        req: &FindSimilar,
    ) -> Result<SubmittedJob> {
        BonsaiClient::find_similar_samples(self, sample_id, req).await
    }
}
