//! Clap derive structures for the `homewatt` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// homewatt -- scripting-friendly client for the energy dashboard
#[derive(Debug, Parser)]
#[command(
    name = "homewatt",
    version,
    about = "Query and manage the household energy-monitoring backend",
    long_about = "One-shot queries and mutations against the energy dashboard's\n\
        REST API: rooms, appliances, usage history, alerts, and the\n\
        backend's data simulator. For a live view, see homewatt-tui.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend URL (overrides the config file)
    #[arg(long, short = 's', env = "HOMEWATT_SERVER", global = true)]
    pub server: Option<String>,

    /// Config file path (defaults to the platform config dir)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HOMEWATT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "HOMEWATT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the aggregate usage counters
    Stats,

    /// List rooms and their appliances
    #[command(alias = "r")]
    Rooms(RoomsArgs),

    /// Show the usage history
    #[command(alias = "hist")]
    History(HistoryArgs),

    /// Show the latest per-appliance energy readings
    Readings,

    /// List threshold alerts
    Alerts,

    /// Create, rename, or delete a room
    Room(RoomArgs),

    /// Create, edit, toggle, or delete an appliance
    #[command(alias = "app")]
    Appliance(ApplianceArgs),

    /// Manage usage logs
    Log(LogArgs),

    /// Trigger the backend's data simulator
    #[command(alias = "sim")]
    Simulate(SimulateArgs),

    /// Manage alert thresholds
    Thresholds(ThresholdsArgs),
}

// ── Read commands ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RoomsArgs {
    /// Include every appliance under its room
    #[arg(long, short = 'd')]
    pub detail: bool,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Show monthly aggregates instead of individual logs
    #[arg(long, short = 'm')]
    pub monthly: bool,
}

// ── Room mutations ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RoomArgs {
    #[command(subcommand)]
    pub command: RoomCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoomCommand {
    /// Add a room
    Add {
        /// Room name
        name: String,
    },

    /// Rename a room
    Rename {
        /// Room id or current name
        room: String,
        /// New name
        name: String,
    },

    /// Delete a room (cascades to its appliances and logs)
    #[command(alias = "delete")]
    Rm {
        /// Room id or name
        room: String,
    },
}

// ── Appliance mutations ──────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ApplianceArgs {
    #[command(subcommand)]
    pub command: ApplianceCommand,
}

#[derive(Debug, Subcommand)]
pub enum ApplianceCommand {
    /// Add an appliance to a room
    Add {
        /// Room id or name
        #[arg(long, short = 'r')]
        room: String,

        /// Appliance name
        name: String,

        /// Number of units
        #[arg(long, default_value = "1")]
        quantity: i64,

        /// Minimum power rating in watts
        #[arg(long = "min-watts", default_value = "0")]
        min_watts: f64,

        /// Maximum power rating in watts
        #[arg(long = "max-watts", default_value = "0")]
        max_watts: f64,
    },

    /// Edit an appliance (unset flags keep their current values)
    Edit {
        /// Appliance id
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New unit count
        #[arg(long)]
        quantity: Option<i64>,

        /// New minimum power rating in watts
        #[arg(long = "min-watts")]
        min_watts: Option<f64>,

        /// New maximum power rating in watts
        #[arg(long = "max-watts")]
        max_watts: Option<f64>,
    },

    /// Flip an appliance on or off
    Toggle {
        /// Appliance id
        id: i64,
    },

    /// Delete an appliance (cascades to its logs)
    #[command(alias = "delete")]
    Rm {
        /// Appliance id
        id: i64,
    },
}

// ── Usage log mutations ──────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LogArgs {
    #[command(subcommand)]
    pub command: LogCommand,
}

#[derive(Debug, Subcommand)]
pub enum LogCommand {
    /// Delete a usage log entry
    #[command(alias = "delete")]
    Rm {
        /// Usage log id
        id: i64,
    },
}

// ── Simulation & thresholds ──────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SimulateArgs {
    #[command(subcommand)]
    pub command: SimulateCommand,
}

#[derive(Debug, Subcommand)]
pub enum SimulateCommand {
    /// Generate a batch of simulated usage data
    Data,
    /// Evaluate thresholds and generate alerts
    Alerts,
}

#[derive(Debug, Args)]
pub struct ThresholdsArgs {
    #[command(subcommand)]
    pub command: ThresholdsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ThresholdsCommand {
    /// Set the warning/critical alert thresholds (kWh)
    Set {
        /// Warning threshold in kWh
        #[arg(long)]
        warning: f64,

        /// Critical threshold in kWh
        #[arg(long)]
        critical: f64,
    },
}
