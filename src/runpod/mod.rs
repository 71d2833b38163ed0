// src/runpod/mod.rs
mod client;
mod models;

pub use client::RunpodClient;
pub use models::{HealthResponse, JobResponse, WorkerHealth};
