//! Users service invoker
//!
//! Waits for the users server to answer, then drives a fixed demonstration
//! sequence through the three RPCs and reports a summary.

pub mod client;
pub mod config;
pub mod demo;

pub use client::{UsersGrpcClient, connect, wait_for_server};
pub use config::Config;
pub use demo::{DemoError, DemoSummary, run_demo};

use core_config::FromEnv;
use eyre::{Result, WrapErr};
use tracing::{info, warn};

/// Run the invoker end to end
///
/// # Errors
///
/// Returns an error if configuration is invalid, the server never becomes
/// ready, or the server becomes unreachable during the demonstration.
pub async fn run() -> Result<()> {
    let config = Config::from_env().wrap_err("Failed to load configuration")?;

    core_config::tracing::init_tracing(&config.environment);

    info!(addr = %config.server_addr, "Connecting to UsersService");
    let client = connect(&config.server_addr, config.channel.clone())
        .wrap_err("Failed to create gRPC channel")?;

    wait_for_server(&client, &config.server_readiness)
        .await
        .wrap_err("UsersService did not become ready")?;

    let summary = run_demo(client).await.wrap_err("Demonstration aborted")?;

    if summary.all_passed() {
        info!(steps = summary.total(), "All demonstration steps behaved as expected");
    } else {
        warn!(
            failed = summary.failed(),
            steps = summary.total(),
            "Some demonstration steps deviated from expectations"
        );
    }

    Ok(())
}
