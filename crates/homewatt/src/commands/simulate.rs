//! Simulation and threshold handlers.

use homewatt_core::Dashboard;

use crate::cli::{GlobalOpts, SimulateArgs, SimulateCommand, ThresholdsArgs, ThresholdsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle_simulate(
    dashboard: &Dashboard,
    args: SimulateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let ack = match args.command {
        SimulateCommand::Data => dashboard.simulate_data().await?,
        SimulateCommand::Alerts => dashboard.simulate_alerts().await?,
    };
    util::print_ack(
        &ack.message,
        output::should_color(&global.color),
        global.quiet,
    );
    Ok(())
}

pub async fn handle_thresholds(
    dashboard: &Dashboard,
    args: ThresholdsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ThresholdsCommand::Set { warning, critical } => {
            if warning <= 0.0 || critical <= 0.0 {
                return Err(CliError::Validation {
                    field: "thresholds".into(),
                    reason: "thresholds must be positive".into(),
                });
            }
            if warning >= critical {
                return Err(CliError::Validation {
                    field: "warning".into(),
                    reason: "warning threshold must be below critical".into(),
                });
            }
            let ack = dashboard.set_thresholds(warning, critical).await?;
            util::print_ack(
                &ack.message,
                output::should_color(&global.color),
                global.quiet,
            );
            Ok(())
        }
    }
}
