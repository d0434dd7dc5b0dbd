//! Configuration module
//!
//! Handles CLI configuration: API location, credentials and polling limits.

use anyhow::{Context, Result};
use bonsai_client::BonsaiClient;
use bonsai_runner::RunnerConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Runner settings, including the API URL
    pub runner: RunnerConfig,
    /// Bearer token for the API
    pub token: Option<String>,
}

impl Config {
    pub fn new(runner: RunnerConfig, token: Option<String>) -> Result<Self> {
        runner.validate().context("Invalid configuration")?;
        Ok(Self { runner, token })
    }

    /// Builds an API client for the configured URL and token
    pub fn client(&self) -> BonsaiClient {
        let client = BonsaiClient::new(self.runner.api_url.clone());
        match &self.token {
            Some(token) => client.with_token(token.clone()),
            None => client,
        }
    }
}
