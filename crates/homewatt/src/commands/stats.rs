//! Dashboard statistics command handler.

use homewatt_core::{Dashboard, DashboardStats};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

/// The four counters, one per line. Every figure is the server's own;
/// anything the backend omitted reads 0.00.
fn detail(stats: &DashboardStats) -> String {
    format!(
        "Current usage:  {:>10.2} kWh\n\
         Today:          {:>10.2} kWh\n\
         This month:     {:>10.2} kWh\n\
         Total:          {:>10.2} kWh",
        stats.current_kwh, stats.today_kwh, stats.monthly_kwh, stats.total_kwh
    )
}

pub async fn handle(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    dashboard.refresh_stats().await;
    let stats = util::view_data(dashboard.store().stats(), "dashboard stats")?;

    let out = output::render_single(&global.output, stats.as_ref(), detail, |s| {
        format!("{:.2}", s.current_kwh)
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
