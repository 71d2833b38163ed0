// src/pinger/runner.rs
use super::{PingResult, Probe};
use crate::config::Config;
use crate::runpod::WorkerHealth;
use chrono::Utc;
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

/// What one cycle of the loop ended up doing.
#[derive(Debug)]
pub enum CycleOutcome {
    Pinged(PingResult),
    /// Health gate found no ready or idle workers.
    Skipped(WorkerHealth),
    /// Health gate could not reach the endpoint.
    HealthCheckFailed(String),
}

pub struct Pinger<P> {
    probe: P,
    endpoint_id: String,
    interval: Duration,
    health_gate: bool,
    cycles: u64,
}

impl<P: Probe> Pinger<P> {
    pub fn new(probe: P, config: &Config) -> Self {
        Self {
            probe,
            endpoint_id: config.endpoint_id.clone(),
            interval: config.interval(),
            health_gate: config.health_gate,
            cycles: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of cycles started so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Ping forever. The first ping goes out immediately, later ones start
    /// `interval` after the previous one started (or right after it
    /// finished, if it took longer than that).
    pub async fn run(&mut self) {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Starting keep-alive loop for {} with interval: {:?}",
            self.endpoint_id, self.interval
        );

        loop {
            ticker.tick().await;
            self.cycle().await;
            debug!("Next ping in {:?}", self.interval);
        }
    }

    /// Run a single cycle. Never fails: every error is logged and folded
    /// into the returned outcome.
    pub async fn cycle(&mut self) -> CycleOutcome {
        self.cycles += 1;
        info!(cycle = self.cycles, "Ping #{} at {}", self.cycles, Utc::now().to_rfc3339());

        if self.health_gate {
            match self.probe.health().await {
                Ok(workers) if !workers.has_warm_workers() => {
                    info!(
                        endpoint = %self.endpoint_id,
                        initializing = workers.initializing,
                        "No ready workers, skipping ping"
                    );
                    return CycleOutcome::Skipped(workers);
                }
                Ok(workers) => {
                    info!(
                        endpoint = %self.endpoint_id,
                        "ready={}, idle={}, init={}",
                        workers.ready, workers.idle, workers.initializing
                    );
                }
                Err(e) => {
                    error!(endpoint = %self.endpoint_id, "Health check failed: {}", e);
                    return CycleOutcome::HealthCheckFailed(e.to_string());
                }
            }
        }

        let timestamp = Utc::now();
        let start = Instant::now();
        let outcome = self.probe.ping().await;

        let result = PingResult::new(timestamp, start.elapsed(), &outcome);
        result.log(&self.endpoint_id);
        CycleOutcome::Pinged(result)
    }
}
