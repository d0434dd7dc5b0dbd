//! Bonsai HTTP Client
//!
//! A small, type-safe HTTP client for the job endpoints of the Bonsai REST API.
//!
//! Jobs are long-running server-side computations (clustering, similarity
//! search). Submitting one returns a [`SubmittedJob`](bonsai_core::dto::job::SubmittedJob)
//! whose progress is then observed through [`BonsaiClient::job_status`].
//!
//! # Example
//!
//! ```no_run
//! use bonsai_client::BonsaiClient;
//! use bonsai_core::domain::cluster::TypingMethod;
//! use bonsai_core::dto::cluster::ClusterSamples;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bonsai_client::ClientError> {
//!     let client = BonsaiClient::new("http://localhost:8000");
//!
//!     let job = client
//!         .cluster_samples(
//!             TypingMethod::Cgmlst,
//!             &ClusterSamples::new(vec!["s1".into(), "s2".into()]),
//!         )
//!         .await?;
//!
//!     let status = client.job_status(&job.id).await?;
//!     println!("Job {} is {}", job.id, status.status);
//!     Ok(())
//! }
//! ```

mod api;
mod cluster;
pub mod error;
mod jobs;

pub use api::JobApi;
pub use error::{ClientError, Result};

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// HTTP client for the Bonsai API
#[derive(Debug, Clone)]
pub struct BonsaiClient {
    /// Base URL of the API (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer token sent with every request
    token: Option<String>,
}

impl BonsaiClient {
    /// Create a new API client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API (e.g., "http://localhost:8000")
    ///
    /// # Example
    /// ```
    /// use bonsai_client::BonsaiClient;
    ///
    /// let client = BonsaiClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new API client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use bonsai_client::BonsaiClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = BonsaiClient::with_client("http://localhost:8000", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
        }
    }

    /// Authenticate every request with a bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.authorize(self.client.get(url))
    }

    fn post(&self, url: &str) -> RequestBuilder {
        self.authorize(self.client.post(url))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(ACCEPT, "application/json");
        match &self.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BonsaiClient::new("http://localhost:8000");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert!(client.token.is_none());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = BonsaiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client =
            BonsaiClient::with_client("http://localhost:8000", http_client).with_token("abc");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.token.as_deref(), Some("abc"));
    }
}
