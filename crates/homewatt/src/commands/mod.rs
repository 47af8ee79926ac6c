//! Command dispatch: bridges CLI args -> controller calls -> output formatting.

pub mod alerts;
pub mod appliances;
pub mod history;
pub mod readings;
pub mod rooms;
pub mod simulate;
pub mod stats;
pub mod util;

use homewatt_core::Dashboard;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &Dashboard,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Stats => stats::handle(dashboard, global).await,
        Command::Rooms(args) => rooms::handle_list(dashboard, args, global).await,
        Command::History(args) => history::handle_list(dashboard, args, global).await,
        Command::Readings => readings::handle(dashboard, global).await,
        Command::Alerts => alerts::handle(dashboard, global).await,
        Command::Room(args) => rooms::handle_mutation(dashboard, args, global).await,
        Command::Appliance(args) => appliances::handle(dashboard, args, global).await,
        Command::Log(args) => history::handle_mutation(dashboard, args, global).await,
        Command::Simulate(args) => simulate::handle_simulate(dashboard, args, global).await,
        Command::Thresholds(args) => simulate::handle_thresholds(dashboard, args, global).await,
    }
}
