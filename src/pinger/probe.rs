// src/pinger/probe.rs
use super::PingError;
use crate::runpod::WorkerHealth;
use async_trait::async_trait;

/// What a successful ping brought back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingResponse {
    pub status_code: u16,
    pub job_status: Option<String>,
}

/// The remote side of the keep-alive loop.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Send one keep-alive request. Non-2xx responses are errors.
    async fn ping(&self) -> Result<PingResponse, PingError>;

    /// Report the endpoint's worker counts.
    async fn health(&self) -> Result<WorkerHealth, PingError>;
}
