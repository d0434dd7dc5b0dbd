//! Clustering and similarity search endpoints
//!
//! Both endpoints only enqueue work; the returned [`SubmittedJob`] is then
//! tracked through [`BonsaiClient::job_status`].

use crate::BonsaiClient;
use crate::error::{ClientError, Result};
use bonsai_core::domain::cluster::TypingMethod;
use bonsai_core::dto::cluster::{ClusterSamples, FindSimilar};
use bonsai_core::dto::job::SubmittedJob;
use tracing::debug;

impl BonsaiClient {
    /// Submit a clustering job for a set of samples
    ///
    /// # Arguments
    /// * `typing_method` - Typing result the samples are clustered on
    /// * `req` - Samples and clustering parameters
    pub async fn cluster_samples(
        &self,
        typing_method: TypingMethod,
        req: &ClusterSamples,
    ) -> Result<SubmittedJob> {
        req.validate().map_err(ClientError::InvalidRequest)?;

        let url = format!("{}/cluster/{}/", self.base_url, typing_method);
        debug!(
            %typing_method,
            method = %req.method,
            samples = req.sample_ids.len(),
            "submitting clustering job"
        );
        let response = self.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Submit a search for samples similar to a reference sample
    ///
    /// # Arguments
    /// * `sample_id` - The reference sample
    /// * `req` - Similarity threshold, result limit and optional clustering
    pub async fn find_similar_samples(
        &self,
        sample_id: &str,
        req: &FindSimilar,
    ) -> Result<SubmittedJob> {
        req.validate().map_err(ClientError::InvalidRequest)?;

        let url = format!("{}/samples/{}/similar", self.base_url, sample_id);
        debug!(
            sample_id,
            similarity = req.similarity,
            limit = ?req.limit,
            cluster = req.cluster,
            "submitting similarity search"
        );
        let response = self.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{BonsaiClient, ClientError};
    use bonsai_core::domain::cluster::{ClusterMethod, TypingMethod};
    use bonsai_core::dto::cluster::{ClusterSamples, FindSimilar};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_cluster_samples_posts_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cluster/cgmlst/"))
            .and(body_json(json!({
                "sample_ids": ["s1", "s2", "s3"],
                "method": "neighbor_joining",
                "distance": "jaccard"
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "id": "job-1", "task": "cluster" })),
            )
            .mount(&server)
            .await;

        let client = BonsaiClient::new(server.uri());
        let req = ClusterSamples::new(vec!["s1".into(), "s2".into(), "s3".into()])
            .with_method(ClusterMethod::NeighborJoining);
        let job = client
            .cluster_samples(TypingMethod::Cgmlst, &req)
            .await
            .unwrap();

        assert_eq!(job.id.as_str(), "job-1");
        assert_eq!(job.task, "cluster");
    }

    #[tokio::test]
    async fn test_cluster_samples_on_ska_index() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cluster/ska/"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({ "id": "job-2", "task": "ska_cluster" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = BonsaiClient::new(server.uri());
        let req = ClusterSamples::new(vec!["s1".into(), "s2".into()]);
        let job = client
            .cluster_samples(TypingMethod::Ska, &req)
            .await
            .unwrap();

        assert_eq!(job.id.as_str(), "job-2");
    }

    #[tokio::test]
    async fn test_cluster_samples_validates_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = BonsaiClient::new(server.uri());
        let req = ClusterSamples::new(vec!["s1".into()]);
        let err = client
            .cluster_samples(TypingMethod::Mlst, &req)
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_find_similar_samples() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/samples/ref-1/similar"))
            .and(body_json(json!({
                "similarity": 0.9,
                "limit": 5,
                "cluster": false,
                "typing_method": null,
                "cluster_method": null
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "id": "job-2", "task": "similar" })),
            )
            .mount(&server)
            .await;

        let client = BonsaiClient::new(server.uri());
        let req = FindSimilar::new(0.9).with_limit(Some(5));
        let job = client.find_similar_samples("ref-1", &req).await.unwrap();

        assert_eq!(job.id.as_str(), "job-2");
    }

    #[tokio::test]
    async fn test_find_similar_samples_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/samples/ref-1/similar"))
            .respond_with(ResponseTemplate::new(500).set_body_string("index unavailable"))
            .mount(&server)
            .await;

        let client = BonsaiClient::new(server.uri());
        let err = client
            .find_similar_samples("ref-1", &FindSimilar::default())
            .await
            .unwrap_err();

        assert!(err.is_server_error());
    }
}
