//! Job-related API endpoints

use crate::BonsaiClient;
use crate::error::Result;
use bonsai_core::domain::job::{JobId, JobStatusEnvelope};
use tracing::debug;

impl BonsaiClient {
    // =============================================================================
    // Job Status
    // =============================================================================

    /// Get the current status of a submitted job
    ///
    /// A job that is still running is a normal response, not an error.
    ///
    /// # Arguments
    /// * `job_id` - The job identifier returned on submission
    ///
    /// # Returns
    /// A snapshot of the job state
    ///
    /// # Example
    /// ```no_run
    /// # use bonsai_client::BonsaiClient;
    /// # use bonsai_core::domain::job::JobId;
    /// # async fn example() -> Result<(), bonsai_client::ClientError> {
    /// let client = BonsaiClient::new("http://localhost:8000");
    /// let envelope = client.job_status(&JobId::from("a1b2c3")).await?;
    /// println!("job is {}", envelope.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn job_status(&self, job_id: &JobId) -> Result<JobStatusEnvelope> {
        let url = format!("{}/job/status/{}", self.base_url, job_id);
        debug!(%job_id, "fetching job status");
        let response = self.get(&url).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{BonsaiClient, ClientError};
    use bonsai_core::domain::job::{JobId, JobStatus};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_job_status_decodes_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job/status/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "started",
                "queue": "cgmlst",
                "result": null,
                "submitted_at": "2024-03-01T10:00:00Z",
                "started_at": null,
                "finished_at": null
            })))
            .mount(&server)
            .await;

        let client = BonsaiClient::new(server.uri());
        let envelope = client.job_status(&JobId::from("abc")).await.unwrap();

        assert_eq!(envelope.status, JobStatus::Started);
        assert_eq!(envelope.queue.as_deref(), Some("cgmlst"));
        assert!(envelope.result.is_none());
    }

    #[tokio::test]
    async fn test_job_status_sends_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job/status/abc"))
            .and(header("authorization", "Bearer secret"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "queued" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = BonsaiClient::new(server.uri()).with_token("secret");
        let envelope = client.job_status(&JobId::from("abc")).await.unwrap();
        assert_eq!(envelope.status, JobStatus::Queued);
    }

    #[tokio::test]
    async fn test_job_status_maps_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job/status/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("No such job"))
            .mount(&server)
            .await;

        let client = BonsaiClient::new(server.uri());
        let err = client.job_status(&JobId::from("missing")).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(matches!(err, ClientError::ApiError { ref message, .. } if message == "No such job"));
    }

    #[tokio::test]
    async fn test_job_status_rejects_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job/status/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let client = BonsaiClient::new(server.uri());
        let err = client.job_status(&JobId::from("abc")).await.unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_job_status_transport_error() {
        // Nothing listens on port 9 of the loopback interface
        let client = BonsaiClient::new("http://127.0.0.1:9");
        let err = client.job_status(&JobId::from("abc")).await.unwrap_err();
        assert!(matches!(err, ClientError::RequestFailed(_)));
    }
}
