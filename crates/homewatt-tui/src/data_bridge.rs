//! Data bridge — connects the view store's watch channels to TUI actions.
//!
//! Runs as a background task: logs in, primes every view, starts the
//! polling cycle, then loops forwarding every slot change as an
//! [`Action`] through the TUI's action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use homewatt_core::Dashboard;

use crate::action::{Action, Notification};

/// Spawn the data bridge connecting the [`Dashboard`] store to the TUI.
///
/// Login failure is a notification, not a shutdown: the views degrade to
/// their login prompts and the user can restart once the backend is up.
pub async fn spawn_data_bridge(
    dashboard: Dashboard,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    if let Err(e) = dashboard.login().await {
        warn!(error = %e, "login failed");
        let _ = action_tx.send(Action::Notify(Notification::warning(
            e.notification_message(),
        )));
    }

    // Subscribe before the first refresh so no update can slip past.
    let store = dashboard.store();
    let mut stats = store.subscribe_stats();
    let mut rooms = store.subscribe_rooms();
    let mut history = store.subscribe_history();
    let mut readings = store.subscribe_readings();
    let mut alerts = store.subscribe_alerts();
    let mut last_refresh = store.subscribe_last_refresh();

    // Initial snapshots so every screen renders its Loading state at once.
    let _ = action_tx.send(Action::StatsUpdated(store.stats()));
    let _ = action_tx.send(Action::RoomsUpdated(store.rooms()));
    let _ = action_tx.send(Action::HistoryUpdated(store.history()));
    let _ = action_tx.send(Action::ReadingsUpdated(store.readings()));
    let _ = action_tx.send(Action::AlertsUpdated(store.alerts()));

    dashboard.refresh_all().await;
    dashboard.start_polling().await;

    // Forward every slot change until cancelled.
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = stats.changed() => {
                let state = stats.borrow_and_update().clone();
                let _ = action_tx.send(Action::StatsUpdated(state));
            }
            Ok(()) = rooms.changed() => {
                let state = rooms.borrow_and_update().clone();
                let _ = action_tx.send(Action::RoomsUpdated(state));
            }
            Ok(()) = history.changed() => {
                let state = history.borrow_and_update().clone();
                let _ = action_tx.send(Action::HistoryUpdated(state));
            }
            Ok(()) = readings.changed() => {
                let state = readings.borrow_and_update().clone();
                let _ = action_tx.send(Action::ReadingsUpdated(state));
            }
            Ok(()) = alerts.changed() => {
                let state = alerts.borrow_and_update().clone();
                let _ = action_tx.send(Action::AlertsUpdated(state));
            }
            Ok(()) = last_refresh.changed() => {
                if let Some(at) = *last_refresh.borrow_and_update() {
                    let _ = action_tx.send(Action::DataRefreshed(at));
                }
            }
        }
    }

    dashboard.stop_polling().await;
    debug!("data bridge shut down");
}
