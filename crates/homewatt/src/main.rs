//! `homewatt` — one-shot CLI for the household energy-monitoring backend.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use homewatt_core::{Dashboard, DashboardConfig};

use crate::cli::{Cli, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("Error: {err}");
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = build_config(&cli.global)?;
    let Cli { global, command } = cli;
    tracing::debug!(command = ?command, "dispatching command");

    // One request-response cycle: connect, dispatch, done. No polling.
    Dashboard::oneshot(config, move |dashboard| async move {
        Ok(commands::dispatch(command, &dashboard, &global).await)
    })
    .await
    .map_err(CliError::from)?
}

/// Resolve configuration: file/env via homewatt-config, then CLI flags on top.
fn build_config(global: &GlobalOpts) -> Result<DashboardConfig, CliError> {
    let mut file_config = match &global.config {
        Some(path) => homewatt_config::load_config_from(path),
        None => homewatt_config::load_config(),
    }?;

    if let Some(ref server) = global.server {
        file_config.server = server.clone();
    }
    if let Some(secs) = global.timeout {
        file_config.timeout_secs = secs;
    }

    // `Dashboard::oneshot` zeroes the poll interval itself.
    Ok(homewatt_config::to_dashboard_config(&file_config)?)
}
