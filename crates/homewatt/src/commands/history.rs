//! Usage history handlers: the log/monthly listings and log deletion.

use tabled::Tabled;

use homewatt_core::{Dashboard, MonthlyUsage, UsageLog};

use crate::cli::{GlobalOpts, HistoryArgs, LogArgs, LogCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Appliance")]
    appliance: String,
    #[tabled(rename = "Energy")]
    energy: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
}

impl From<&UsageLog> for LogRow {
    fn from(log: &UsageLog) -> Self {
        Self {
            id: log.id,
            appliance: log.appliance.clone(),
            energy: format!("{:.2} kWh", log.energy_kwh),
            duration: format!("{:.1} h", log.duration_hours),
            timestamp: log
                .timestamp
                .map_or_else(|| "Unknown".into(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Energy")]
    energy: String,
}

impl From<&MonthlyUsage> for MonthRow {
    fn from(m: &MonthlyUsage) -> Self {
        Self {
            month: m.month.clone(),
            energy: format!("{:.2} kWh", m.energy_kwh),
        }
    }
}

// ── Listing ─────────────────────────────────────────────────────────

pub async fn handle_list(
    dashboard: &Dashboard,
    args: HistoryArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    dashboard.refresh_history().await;
    let history = util::view_data(dashboard.store().history(), "usage history")?;

    if args.monthly {
        if history.monthly.is_empty() {
            if !global.quiet {
                println!("No monthly data");
            }
            return Ok(());
        }
        let out = output::render_list(&global.output, &history.monthly, |m| MonthRow::from(m), |m| {
            m.month.clone()
        });
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    if history.logs.is_empty() {
        if !global.quiet {
            println!("No usage history available");
        }
        return Ok(());
    }
    let out = output::render_list(&global.output, &history.logs, |log| LogRow::from(log), |log| {
        log.id.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Mutations ───────────────────────────────────────────────────────

pub async fn handle_mutation(
    dashboard: &Dashboard,
    args: LogArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LogCommand::Rm { id } => {
            if !util::confirm(&format!("Delete usage log #{id}?"), global.yes)? {
                return Ok(());
            }
            let ack = dashboard.delete_usage_log(id).await?;
            util::print_ack(
                &ack.message,
                output::should_color(&global.color),
                global.quiet,
            );
            Ok(())
        }
    }
}
