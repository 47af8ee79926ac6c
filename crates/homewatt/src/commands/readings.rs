//! Energy readings command handler.

use tabled::Tabled;

use homewatt_core::{Dashboard, EnergyReading};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ReadingRow {
    #[tabled(rename = "Appliance")]
    appliance: String,
    #[tabled(rename = "Power")]
    power: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
}

impl From<&EnergyReading> for ReadingRow {
    fn from(r: &EnergyReading) -> Self {
        Self {
            appliance: r.appliance.clone(),
            power: format!("{:.2} kWh", r.power_kwh),
            status: r.status.label(),
            timestamp: r
                .timestamp
                .map_or_else(|| "Unknown".into(), |t| t.format("%H:%M:%S").to_string()),
        }
    }
}

pub async fn handle(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    dashboard.refresh_readings().await;
    let readings = util::view_data(dashboard.store().readings(), "energy readings")?;

    if readings.is_empty() {
        if !global.quiet {
            println!("No energy readings available");
        }
        return Ok(());
    }

    let out = output::render_list(&global.output, &readings, |r| ReadingRow::from(r), |r| {
        r.appliance.clone()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
