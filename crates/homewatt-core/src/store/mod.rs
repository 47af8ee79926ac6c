// ── Central view store ──
//
// One reactive slot per dashboard view. The store holds transient,
// non-authoritative copies of server data: every refresh fully replaces a
// slot's contents and subscribers re-render from the new snapshot.

mod view_slot;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use homewatt_api::{Error as ApiError, FetchOutcome};

use crate::model::{Alert, DashboardStats, EnergyReading, Room, UsageHistory};

pub use view_slot::ViewState;
pub(crate) use view_slot::ViewSlot;

/// Reactive store for every dashboard view.
pub struct ViewStore {
    pub(crate) stats: ViewSlot<DashboardStats>,
    pub(crate) rooms: ViewSlot<Vec<Room>>,
    pub(crate) history: ViewSlot<UsageHistory>,
    pub(crate) readings: ViewSlot<Vec<EnergyReading>>,
    pub(crate) alerts: ViewSlot<Vec<Alert>>,
    pub(crate) last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl ViewStore {
    pub fn new() -> Self {
        let (last_refresh, _) = watch::channel(None);
        Self {
            stats: ViewSlot::new(),
            rooms: ViewSlot::new(),
            history: ViewSlot::new(),
            readings: ViewSlot::new(),
            alerts: ViewSlot::new(),
            last_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn stats(&self) -> ViewState<Arc<DashboardStats>> {
        self.stats.current()
    }

    pub fn rooms(&self) -> ViewState<Arc<Vec<Room>>> {
        self.rooms.current()
    }

    pub fn history(&self) -> ViewState<Arc<UsageHistory>> {
        self.history.current()
    }

    pub fn readings(&self) -> ViewState<Arc<Vec<EnergyReading>>> {
        self.readings.current()
    }

    pub fn alerts(&self) -> ViewState<Arc<Vec<Alert>>> {
        self.alerts.current()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_stats(&self) -> watch::Receiver<ViewState<Arc<DashboardStats>>> {
        self.stats.subscribe()
    }

    pub fn subscribe_rooms(&self) -> watch::Receiver<ViewState<Arc<Vec<Room>>>> {
        self.rooms.subscribe()
    }

    pub fn subscribe_history(&self) -> watch::Receiver<ViewState<Arc<UsageHistory>>> {
        self.history.subscribe()
    }

    pub fn subscribe_readings(&self) -> watch::Receiver<ViewState<Arc<Vec<EnergyReading>>>> {
        self.readings.subscribe()
    }

    pub fn subscribe_alerts(&self) -> watch::Receiver<ViewState<Arc<Vec<Alert>>>> {
        self.alerts.subscribe()
    }

    // ── Apply (crate-internal, used by the controller) ───────────────

    pub(crate) fn apply_stats(&self, result: Result<FetchOutcome<DashboardStats>, ApiError>) {
        self.stats.apply(result);
    }

    pub(crate) fn apply_rooms(&self, result: Result<FetchOutcome<Vec<Room>>, ApiError>) {
        self.rooms.apply(result);
    }

    pub(crate) fn apply_history(&self, result: Result<FetchOutcome<UsageHistory>, ApiError>) {
        self.history.apply(result);
    }

    pub(crate) fn apply_readings(&self, result: Result<FetchOutcome<Vec<EnergyReading>>, ApiError>) {
        self.readings.apply(result);
    }

    pub(crate) fn apply_alerts(&self, result: Result<FetchOutcome<Vec<Alert>>, ApiError>) {
        self.alerts.apply(result);
    }

    /// Record the completion of a refresh pass.
    pub(crate) fn mark_refreshed(&self) {
        let _ = self.last_refresh.send(Some(Utc::now()));
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    pub fn subscribe_last_refresh(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.last_refresh.subscribe()
    }

    /// How long ago the last refresh completed, or `None` if never.
    pub fn data_age(&self) -> Option<chrono::Duration> {
        self.last_refresh().map(|t| Utc::now() - t)
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}
