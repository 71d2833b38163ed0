// src/runpod/client.rs
use super::models::{HealthResponse, JobResponse, WorkerHealth};
use crate::config::Config;
use crate::pinger::{PingError, PingResponse, Probe};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;
use url::Url;

/// HTTP client for a single serverless endpoint.
pub struct RunpodClient {
    client: Client,
    api_key: String,
    run_url: Url,
    health_url: Url,
}

impl RunpodClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            run_url: endpoint_url(&config.api_base, &config.endpoint_id, "runsync")?,
            health_url: endpoint_url(&config.api_base, &config.endpoint_id, "health")?,
        })
    }

    /// `{api_base}/{endpoint_id}/runsync`
    pub fn run_url(&self) -> &Url {
        &self.run_url
    }

    /// `{api_base}/{endpoint_id}/health`
    pub fn health_url(&self) -> &Url {
        &self.health_url
    }
}

fn endpoint_url(api_base: &str, endpoint_id: &str, action: &str) -> Result<Url> {
    let raw = format!("{}/{}/{}", api_base.trim_end_matches('/'), endpoint_id, action);
    Url::parse(&raw).with_context(|| format!("Invalid endpoint URL: {}", raw))
}

#[async_trait]
impl Probe for RunpodClient {
    async fn ping(&self) -> Result<PingResponse, PingError> {
        debug!("POST {}", self.run_url);

        let response = self
            .client
            .post(self.run_url.clone())
            .bearer_auth(&self.api_key)
            .json(&json!({ "input": {} }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PingError::Status(status.as_u16()));
        }

        // A 2xx is enough to keep the worker warm; the body is only read for
        // the job status and may not be JSON at all.
        let body = response.bytes().await?;
        let job: JobResponse = serde_json::from_slice(&body).unwrap_or_default();

        Ok(PingResponse {
            status_code: status.as_u16(),
            job_status: job.status,
        })
    }

    async fn health(&self) -> Result<WorkerHealth, PingError> {
        debug!("GET {}", self.health_url);

        let response = self
            .client
            .get(self.health_url.clone())
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PingError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let health: HealthResponse =
            serde_json::from_slice(&body).map_err(|e| PingError::Decode(e.to_string()))?;

        Ok(health.workers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_API_BASE, DEFAULT_PING_INTERVAL_SECS};
    use mockito::Matcher;

    fn config(api_base: &str) -> Config {
        Config {
            api_key: "rp_test_key".to_string(),
            endpoint_id: "hk5uyae5jtmhmy".to_string(),
            interval_secs: DEFAULT_PING_INTERVAL_SECS,
            timeout_secs: 5,
            health_gate: false,
            api_base: api_base.to_string(),
        }
    }

    #[test]
    fn test_urls_follow_provider_template() {
        let client = RunpodClient::new(&config(DEFAULT_API_BASE)).unwrap();
        assert_eq!(
            client.run_url().as_str(),
            "https://api.runpod.ai/v2/hk5uyae5jtmhmy/runsync"
        );
        assert_eq!(
            client.health_url().as_str(),
            "https://api.runpod.ai/v2/hk5uyae5jtmhmy/health"
        );
    }

    #[test]
    fn test_trailing_slash_on_base_is_ignored() {
        let client = RunpodClient::new(&config("https://api.runpod.ai/v2/")).unwrap();
        assert_eq!(
            client.run_url().as_str(),
            "https://api.runpod.ai/v2/hk5uyae5jtmhmy/runsync"
        );
    }

    #[tokio::test]
    async fn test_ping_sends_bearer_and_minimal_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v2/hk5uyae5jtmhmy/runsync")
            .match_header("authorization", "Bearer rp_test_key")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "input": {} })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"sync-123","status":"COMPLETED"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = RunpodClient::new(&config(&format!("{}/v2", server.url()))).unwrap();
        let response = client.ping().await.unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.job_status.as_deref(), Some("COMPLETED"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_ping_accepts_non_json_success_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v2/hk5uyae5jtmhmy/runsync")
            .with_status(202)
            .with_body("accepted")
            .create_async()
            .await;

        let client = RunpodClient::new(&config(&format!("{}/v2", server.url()))).unwrap();
        let response = client.ping().await.unwrap();

        assert_eq!(response.status_code, 202);
        assert!(response.job_status.is_none());
    }

    #[tokio::test]
    async fn test_ping_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/v2/hk5uyae5jtmhmy/runsync")
            .with_status(401)
            .with_body(r#"{"error":"unauthorized"}"#)
            .create_async()
            .await;

        let client = RunpodClient::new(&config(&format!("{}/v2", server.url()))).unwrap();
        let err = client.ping().await.unwrap_err();

        assert!(matches!(err, PingError::Status(401)));
    }

    #[tokio::test]
    async fn test_health_decodes_workers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/hk5uyae5jtmhmy/health")
            .match_header("authorization", "Bearer rp_test_key")
            .with_status(200)
            .with_body(r#"{"workers":{"ready":1,"idle":0,"initializing":0}}"#)
            .create_async()
            .await;

        let client = RunpodClient::new(&config(&format!("{}/v2", server.url()))).unwrap();
        let workers = client.health().await.unwrap();

        assert_eq!(workers.ready, 1);
        assert!(workers.has_warm_workers());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_health_rejects_garbage_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/hk5uyae5jtmhmy/health")
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = RunpodClient::new(&config(&format!("{}/v2", server.url()))).unwrap();
        let err = client.health().await.unwrap_err();

        assert!(matches!(err, PingError::Decode(_)));
    }
}
