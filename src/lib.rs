// src/lib.rs
pub mod config;
pub mod pinger;
pub mod runpod;
