// src/main.rs
use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};

use runpod_keepalive::config::load_config;
use runpod_keepalive::pinger::Pinger;
use runpod_keepalive::runpod::RunpodClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("runpod_keepalive=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    let config = load_config().context("Failed to load configuration")?;

    info!("Keep-alive service started");
    info!("Endpoint: {}", config.endpoint_id);
    info!("Ping interval: {} seconds", config.interval_secs);
    info!("Ping timeout: {} seconds", config.timeout_secs);
    if config.health_gate {
        info!("Health gate enabled: pings are skipped while no workers are warm");
    }

    let client = RunpodClient::new(&config)?;
    info!("Pinging {}", client.run_url());

    let mut pinger = Pinger::new(client, &config);

    tokio::select! {
        _ = pinger.run() => {},
        _ = shutdown_signal() => {},
    }

    info!("Stopped after {} pings", pinger.cycles());
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
