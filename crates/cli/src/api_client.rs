//! ThousandEyes v7 API client
//!
//! A thin wrapper around `reqwest` covering the four endpoints this tool
//! uses: agent listing, HTTP server test listing and creation, and test
//! result retrieval. Request failures and non-success statuses are logged
//! and collapsed into `None`; callers decide whether that is fatal.

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use te_monitor_common::{
    Agent, AgentList, AgentRef, Config, CreateTestRequest, HttpServerTest, MonitorError,
    TestList, TestResults,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bearer-authenticated client bound to one API base URL
#[derive(Debug, Clone)]
pub struct TeClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl TeClient {
    /// Build a client from the run configuration
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retrieve the first available agent for test creation
    ///
    /// Selection policy is "first in listing order", nothing more. Returns
    /// `None` when the listing call fails or the account has no agents.
    #[instrument(skip(self))]
    pub async fn resolve_first_agent(&self) -> Option<Agent> {
        let list: AgentList = match self.get_json("/agents").await {
            Ok(list) => list,
            Err(err) => {
                warn!("Failed to fetch agents: {err}");
                return None;
            }
        };

        match list.agents.into_iter().next() {
            Some(agent) => {
                info!("Using agent: {} (ID: {})", agent.agent_name, agent.agent_id);
                Some(agent)
            }
            None => {
                warn!("No agents found in this account");
                None
            }
        }
    }

    /// Find an existing HTTP server test by exact name match
    ///
    /// Lookup runs before creation so each distinct name maps to at most
    /// one test. Listing failure and no-match both yield `None`; the
    /// failure case is logged here.
    #[instrument(skip(self))]
    pub async fn find_test_by_name(&self, name: &str) -> Option<i64> {
        let list: TestList = match self.get_json("/tests/http-server").await {
            Ok(list) => list,
            Err(err) => {
                warn!("Failed to retrieve tests: {err}");
                return None;
            }
        };

        let found = list.tests.into_iter().find(|test| test.test_name == name);
        match &found {
            Some(test) => debug!("Found existing test '{}' (ID: {})", name, test.test_id),
            None => debug!("No existing test named '{}'", name),
        }
        found.map(|test| test.test_id)
    }

    /// Create an HTTP server test bound to one agent
    ///
    /// New tests are created enabled. Status 201 is the sole success
    /// signal; anything else is logged and yields `None`.
    #[instrument(skip(self, target))]
    pub async fn create_test(
        &self,
        name: &str,
        target: &str,
        agent_id: i64,
        interval_secs: u64,
    ) -> Option<i64> {
        let payload = CreateTestRequest {
            test_name: name.to_string(),
            test_type: "http-server".to_string(),
            url: target.to_string(),
            interval: interval_secs,
            enabled: true,
            agents: vec![AgentRef { agent_id }],
        };

        let response = match self
            .client
            .post(format!("{}/tests/http-server", self.base_url))
            .bearer_auth(&self.api_token)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!("Error creating test: {err}");
                return None;
            }
        };

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            warn!("Error creating test: {} - {}", status.as_u16(), body);
            return None;
        }

        match response.json::<HttpServerTest>().await {
            Ok(test) => {
                info!("Created test '{}' (ID: {})", name, test.test_id);
                Some(test.test_id)
            }
            Err(err) => {
                warn!("Created test but could not decode response: {err}");
                None
            }
        }
    }

    /// Retrieve the results collection for a test
    ///
    /// Any success status counts; the decoded payload is returned
    /// unmodified so the report writer can persist it verbatim.
    #[instrument(skip(self))]
    pub async fn fetch_results(&self, test_id: i64) -> Option<TestResults> {
        let path = format!("/test-results/{test_id}/http-server");
        match self.get_json::<TestResults>(&path).await {
            Ok(results) => {
                info!("Fetched test results for test ID {test_id}");
                Some(results)
            }
            Err(err) => {
                warn!("Failed to retrieve test results: {err}");
                None
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, MonitorError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MonitorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use te_monitor_common::config::DEFAULT_BASE_URL;

    fn config() -> Config {
        Config {
            api_token: "tok".to_string(),
            test_name: "t".to_string(),
            target: "https://example.com".to_string(),
            base_url: format!("{}/", DEFAULT_BASE_URL),
            interval_secs: 3600,
            output_dir: None,
        }
    }

    #[test]
    fn test_client_strips_trailing_slash() {
        let client = TeClient::new(&config()).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }
}
