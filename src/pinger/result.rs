// src/pinger/result.rs
use super::PingResponse;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum PingError {
    #[error("HTTP {0}")]
    Status(u16),

    #[error("Request timed out (worker may still be loading)")]
    Timeout,

    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for PingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PingError::Timeout
        } else {
            PingError::Transport(err)
        }
    }
}

/// Outcome of one ping, kept only long enough to be logged.
#[derive(Debug)]
pub struct PingResult {
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub latency: Duration,
    pub status_code: Option<u16>,
    pub job_status: Option<String>,
    pub error: Option<String>,
    severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Ok,
    Warn,
    Error,
}

impl PingResult {
    pub fn new(
        timestamp: DateTime<Utc>,
        latency: Duration,
        outcome: &Result<PingResponse, PingError>,
    ) -> Self {
        match outcome {
            Ok(response) => Self {
                timestamp,
                success: true,
                latency,
                status_code: Some(response.status_code),
                job_status: response.job_status.clone(),
                error: None,
                severity: Severity::Ok,
            },
            Err(err) => Self {
                timestamp,
                success: false,
                latency,
                status_code: match err {
                    PingError::Status(code) => Some(*code),
                    _ => None,
                },
                job_status: None,
                error: Some(err.to_string()),
                severity: match err {
                    PingError::Status(_) | PingError::Timeout => Severity::Warn,
                    PingError::Transport(_) | PingError::Decode(_) => Severity::Error,
                },
            },
        }
    }

    pub fn latency_ms(&self) -> u64 {
        self.latency.as_millis() as u64
    }

    /// Emit the log line for this ping. Timeouts and bad statuses are
    /// warnings, anything else that failed is an error.
    pub fn log(&self, endpoint_id: &str) {
        let at = self.timestamp.to_rfc3339();
        let latency_ms = self.latency_ms();

        let cause = self.error.as_deref().unwrap_or("unknown error");
        match self.severity {
            Severity::Ok => info!(
                endpoint = endpoint_id,
                at = %at,
                latency_ms,
                status = self.status_code.unwrap_or_default(),
                job_status = self.job_status.as_deref().unwrap_or("unknown"),
                "Ping OK"
            ),
            Severity::Warn => {
                warn!(endpoint = endpoint_id, at = %at, latency_ms, "Ping failed: {}", cause)
            }
            Severity::Error => {
                error!(endpoint = endpoint_id, at = %at, latency_ms, "Ping failed: {}", cause)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_result() {
        let outcome = Ok(PingResponse {
            status_code: 200,
            job_status: Some("IN_QUEUE".to_string()),
        });
        let result = PingResult::new(Utc::now(), Duration::from_millis(1500), &outcome);

        assert!(result.success);
        assert_eq!(result.status_code, Some(200));
        assert_eq!(result.job_status.as_deref(), Some("IN_QUEUE"));
        assert_eq!(result.latency_ms(), 1500);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_status_failure_keeps_code() {
        let outcome = Err(PingError::Status(503));
        let result = PingResult::new(Utc::now(), Duration::from_millis(20), &outcome);

        assert!(!result.success);
        assert_eq!(result.status_code, Some(503));
        assert_eq!(result.error.as_deref(), Some("HTTP 503"));
    }

    #[test]
    fn test_timeout_has_no_status_code() {
        let outcome = Err(PingError::Timeout);
        let result = PingResult::new(Utc::now(), Duration::from_secs(120), &outcome);

        assert!(!result.success);
        assert!(result.status_code.is_none());
        assert!(result.error.unwrap().contains("timed out"));
    }
}
