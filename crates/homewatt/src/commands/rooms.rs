//! Room command handlers: listing plus add/rename/delete.

use tabled::Tabled;

use homewatt_core::{Dashboard, Room};

use crate::cli::{GlobalOpts, RoomArgs, RoomCommand, RoomsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct RoomRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Appliances")]
    appliances: usize,
    #[tabled(rename = "Power")]
    power: String,
}

impl From<&Room> for RoomRow {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id,
            name: room.name.clone(),
            appliances: room.appliances.len(),
            power: format!("{:.0} W", room.total_power_watts),
        }
    }
}

#[derive(Tabled)]
struct ApplianceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Usage")]
    usage: String,
    #[tabled(rename = "Status")]
    status: &'static str,
}

// ── Listing ─────────────────────────────────────────────────────────

pub async fn handle_list(
    dashboard: &Dashboard,
    args: RoomsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    dashboard.refresh_rooms().await;
    let rooms = util::view_data(dashboard.store().rooms(), "rooms")?;

    if rooms.is_empty() {
        if !global.quiet {
            println!("No rooms found");
        }
        return Ok(());
    }

    if args.detail && matches!(global.output, crate::cli::OutputFormat::Table) {
        if global.quiet {
            return Ok(());
        }
        // One block per room: header line, then its appliance table.
        for room in rooms.iter() {
            println!(
                "{} (id {}, {:.0} W)",
                room.name, room.id, room.total_power_watts
            );
            if room.appliances.is_empty() {
                println!("  no appliances");
            } else {
                let rows: Vec<ApplianceRow> = room
                    .appliances
                    .iter()
                    .map(|a| ApplianceRow {
                        id: a.id,
                        name: a.name.clone(),
                        quantity: a.quantity,
                        rating: a.rating_label(),
                        usage: format!("{:.2} kWh", a.current_usage_kwh),
                        status: a.status.label(),
                    })
                    .collect();
                println!(
                    "{}",
                    tabled::Table::new(rows).with(tabled::settings::Style::rounded())
                );
            }
            println!();
        }
        return Ok(());
    }

    let out = output::render_list(&global.output, &rooms, |room| RoomRow::from(room), |room| {
        room.id.to_string()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Mutations ───────────────────────────────────────────────────────

pub async fn handle_mutation(
    dashboard: &Dashboard,
    args: RoomArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(&global.color);
    match args.command {
        RoomCommand::Add { name } => {
            let ack = dashboard.add_room(&name).await?;
            util::print_ack(&ack.message, color, global.quiet);
            Ok(())
        }

        RoomCommand::Rename { room, name } => {
            let target = util::resolve_room(dashboard, &room).await?;
            let ack = dashboard.rename_room(target.id, &name).await?;
            util::print_ack(&ack.message, color, global.quiet);
            Ok(())
        }

        RoomCommand::Rm { room } => {
            let target = util::resolve_room(dashboard, &room).await?;
            if !util::confirm(
                &format!(
                    "Delete room '{}'? Its appliances and usage logs go with it.",
                    target.name
                ),
                global.yes,
            )? {
                return Ok(());
            }
            let ack = dashboard.delete_room(target.id).await?;
            util::print_ack(&ack.message, color, global.quiet);
            Ok(())
        }
    }
}
