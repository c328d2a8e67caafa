//! gorest-check - Main Entry Point
//!
//! Loads configuration from the environment, runs the user suite once and
//! exits non-zero unless every step passed.

mod report;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use gorest_check_application::UserSuite;
use gorest_check_infrastructure::{ReqwestHttpClient, SystemClock};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::report::Summary;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting gorest-check v{}", env!("CARGO_PKG_VERSION"));

    let config = gorest_check_infrastructure::load().context("failed to load configuration")?;
    let client = Arc::new(ReqwestHttpClient::new().context("failed to create HTTP client")?);
    let suite = UserSuite::new(client, &config, Arc::new(SystemClock::new()))
        .context("failed to set up the suite")?;

    let report = suite.run().await;
    println!("{}", Summary(&report));

    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
