//! Appliance command handlers: add/edit/toggle/delete.

use homewatt_core::{ApplianceUpdate, Dashboard, NewAppliance};

use crate::cli::{ApplianceArgs, ApplianceCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    dashboard: &Dashboard,
    args: ApplianceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    match args.command {
        ApplianceCommand::Add {
            room,
            name,
            quantity,
            min_watts,
            max_watts,
        } => {
            if min_watts > max_watts {
                return Err(CliError::Validation {
                    field: "min-watts".into(),
                    reason: "minimum rating exceeds maximum".into(),
                });
            }
            let target = util::resolve_room(dashboard, &room).await?;
            let ack = dashboard
                .add_appliance(&NewAppliance {
                    room_id: target.id,
                    appliance_name: name,
                    quantity,
                    min_power_rating_watt: min_watts,
                    max_power_rating_watt: max_watts,
                })
                .await?;
            util::print_ack(&ack.message, color, global.quiet);
            Ok(())
        }

        ApplianceCommand::Edit {
            id,
            name,
            quantity,
            min_watts,
            max_watts,
        } => {
            // Prefill from the current record so unset flags keep their values.
            let current = dashboard.fetch_appliance(id).await?;
            let update = ApplianceUpdate {
                appliance_name: name.unwrap_or(current.name),
                quantity: quantity.unwrap_or(i64::from(current.quantity)),
                min_power_rating_watt: min_watts.unwrap_or(current.min_power_watts),
                max_power_rating_watt: max_watts.unwrap_or(current.max_power_watts),
            };
            if update.min_power_rating_watt > update.max_power_rating_watt {
                return Err(CliError::Validation {
                    field: "min-watts".into(),
                    reason: "minimum rating exceeds maximum".into(),
                });
            }
            let ack = dashboard.edit_appliance(id, &update).await?;
            util::print_ack(&ack.message, color, global.quiet);
            Ok(())
        }

        ApplianceCommand::Toggle { id } => {
            let current = util::appliance_status(dashboard, id).await?;
            let ack = dashboard.toggle_appliance(id, current).await?;
            util::print_ack(&ack.message, color, global.quiet);
            Ok(())
        }

        ApplianceCommand::Rm { id } => {
            if !util::confirm(
                &format!("Delete appliance #{id}? Its usage logs go with it."),
                global.yes,
            )? {
                return Ok(());
            }
            let ack = dashboard.delete_appliance(id).await?;
            util::print_ack(&ack.message, color, global.quiet);
            Ok(())
        }
    }
}
