//! Alert listing handler.

use owo_colors::OwoColorize;
use tabled::Tabled;

use homewatt_core::{Alert, AlertLevel, Dashboard};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "Level")]
    level: &'static str,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
}

impl From<&Alert> for AlertRow {
    fn from(alert: &Alert) -> Self {
        Self {
            level: alert.level.label(),
            message: alert.message.clone(),
            timestamp: alert
                .timestamp
                .map_or_else(|| "Unknown".into(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}

/// One colored headline per alert for interactive plain output.
fn colored_headline(alert: &Alert) -> String {
    let headline = alert.headline();
    match alert.level {
        AlertLevel::Critical => headline.red().to_string(),
        AlertLevel::High => headline.yellow().to_string(),
        AlertLevel::Warning => headline,
    }
}

pub async fn handle(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    dashboard.refresh_alerts().await;
    let alerts = util::view_data(dashboard.store().alerts(), "alerts")?;

    if alerts.is_empty() {
        if !global.quiet {
            println!("No alerts");
        }
        return Ok(());
    }

    let color = output::should_color(&global.color);
    let out = output::render_list(&global.output, &alerts, |alert| AlertRow::from(alert), |alert| {
        if color && matches!(global.output, OutputFormat::Plain) {
            colored_headline(alert)
        } else {
            alert.headline()
        }
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
