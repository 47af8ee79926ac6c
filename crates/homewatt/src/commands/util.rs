//! Shared helpers for command handlers.

use std::sync::Arc;

use owo_colors::OwoColorize;

use homewatt_core::{ApplianceStatus, Dashboard, RoomRef, ViewState};

use crate::error::CliError;

/// Unwrap a refreshed view state into its data.
pub fn view_data<T>(state: ViewState<Arc<T>>, view: &'static str) -> Result<Arc<T>, CliError> {
    match state {
        ViewState::Ready(data) => Ok(data),
        ViewState::Unauthenticated => Err(CliError::Auth),
        ViewState::Failed(reason) => Err(CliError::Fetch { view, reason }),
        ViewState::Loading => Err(CliError::Fetch {
            view,
            reason: "nothing fetched".into(),
        }),
    }
}

/// Resolve a room identifier (id or name) to a [`RoomRef`].
pub async fn resolve_room(dashboard: &Dashboard, identifier: &str) -> Result<RoomRef, CliError> {
    let rooms = dashboard.fetch_rooms().await?;

    if let Ok(id) = identifier.parse::<i64>() {
        if let Some(room) = rooms.iter().find(|r| r.id == id) {
            return Ok(room.clone());
        }
    }
    rooms
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(identifier))
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            resource: "room",
            identifier: identifier.into(),
            list_command: "rooms",
        })
}

/// Look up an appliance's current on/off status via the room-usage view.
pub async fn appliance_status(
    dashboard: &Dashboard,
    id: i64,
) -> Result<ApplianceStatus, CliError> {
    dashboard.refresh_rooms().await;
    let rooms = view_data(dashboard.store().rooms(), "rooms")?;
    rooms
        .iter()
        .flat_map(|room| room.appliances.iter())
        .find(|a| a.id == id)
        .map(|a| a.status)
        .ok_or_else(|| CliError::NotFound {
            resource: "appliance",
            identifier: id.to_string(),
            list_command: "rooms --detail",
        })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
/// Declining means no request goes out at all.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Report a mutation acknowledgement on stderr, unless quiet.
pub fn print_ack(message: &str, color: bool, quiet: bool) {
    if quiet || message.is_empty() {
        return;
    }
    if color {
        eprintln!("{}", message.green());
    } else {
        eprintln!("{message}");
    }
}
