// src/pinger/mod.rs
mod probe;
mod result;
mod runner;

pub use probe::{PingResponse, Probe};
pub use result::{PingError, PingResult};
pub use runner::{CycleOutcome, Pinger};
