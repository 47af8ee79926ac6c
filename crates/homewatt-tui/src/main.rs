//! `homewatt-tui` — Live terminal dashboard for household energy monitoring.
//!
//! Built on [ratatui](https://ratatui.rs) with reactive data from
//! `homewatt-core`'s view store. Screens are navigable via number keys
//! (1-4): Overview, Rooms, History, and Alerts.
//!
//! Logs are written to a file (default `/tmp/homewatt-tui.log`) to avoid
//! corrupting the terminal UI. A background data bridge task forwards
//! every store update into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screen;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use homewatt_core::Dashboard;

use crate::app::App;

/// Terminal dashboard for monitoring household energy usage.
#[derive(Parser, Debug)]
#[command(name = "homewatt-tui", version, about)]
struct Cli {
    /// Backend URL (e.g., http://127.0.0.1:5000)
    #[arg(short = 's', long, env = "HOMEWATT_SERVER")]
    server: Option<String>,

    /// Config file path (defaults to the platform config dir)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Polling period in seconds (0 disables live refresh)
    #[arg(long)]
    poll_interval: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "/tmp/homewatt-tui.log")]
    log_file: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("homewatt_tui={log_level}")));

    let log_dir = cli
        .log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = cli
        .log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("homewatt-tui.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Resolve configuration: file/env via homewatt-config, then CLI flags on top.
fn build_dashboard(cli: &Cli) -> Result<Dashboard> {
    let mut file_config = match &cli.config {
        Some(path) => homewatt_config::load_config_from(path),
        None => homewatt_config::load_config(),
    }
    .map_err(|e| eyre!("{e}"))?;

    if let Some(ref server) = cli.server {
        file_config.server = server.clone();
    }
    if let Some(secs) = cli.poll_interval {
        file_config.poll_interval_secs = secs;
    }

    let config = homewatt_config::to_dashboard_config(&file_config).map_err(|e| eyre!("{e}"))?;
    Ok(Dashboard::new(config)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli);

    info!(
        server = cli.server.as_deref().unwrap_or("(from config)"),
        "starting homewatt-tui"
    );

    let dashboard = build_dashboard(&cli)?;
    let mut app = App::new(dashboard);
    app.run().await?;

    Ok(())
}
