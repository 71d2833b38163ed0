// src/runpod/models.rs
use serde::Deserialize;

/// Body returned by the synchronous run API. Only the job status is
/// interesting for a keep-alive ping.
#[derive(Debug, Default, Deserialize)]
pub struct JobResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body returned by the endpoint health API.
#[derive(Debug, Default, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub workers: WorkerHealth,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WorkerHealth {
    #[serde(default)]
    pub ready: u32,
    #[serde(default)]
    pub idle: u32,
    #[serde(default)]
    pub initializing: u32,
    #[serde(default)]
    pub running: u32,
    #[serde(default)]
    pub throttled: u32,
}

impl WorkerHealth {
    pub fn has_warm_workers(&self) -> bool {
        self.ready > 0 || self.idle > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_decodes_partial_worker_counts() {
        let body = r#"{"jobs":{"completed":12,"inQueue":0},"workers":{"idle":1,"initializing":2}}"#;
        let health: HealthResponse = serde_json::from_str(body).unwrap();

        assert_eq!(health.workers.idle, 1);
        assert_eq!(health.workers.initializing, 2);
        assert_eq!(health.workers.ready, 0);
        assert!(health.workers.has_warm_workers());
    }

    #[test]
    fn test_initializing_workers_are_not_warm() {
        let workers = WorkerHealth {
            initializing: 3,
            ..Default::default()
        };
        assert!(!workers.has_warm_workers());
    }
}
