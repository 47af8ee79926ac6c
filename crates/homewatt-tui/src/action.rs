//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use homewatt_core::{
    Alert, ApplianceStatus, ApplianceUpdate, DashboardStats, EnergyReading, NewAppliance, Room,
    UsageHistory, ViewState,
};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Warning,
        }
    }
}

/// A mutation request, dispatched by screens and executed by the app loop
/// against the controller. The success path re-fetches the affected views
/// (the controller owns that mapping) and raises a success toast; the
/// failure path raises an error toast with the server's message.
#[derive(Debug, Clone)]
pub enum Mutation {
    AddRoom { name: String },
    RenameRoom { id: i64, name: String },
    DeleteRoom { id: i64 },
    AddAppliance(NewAppliance),
    EditAppliance { id: i64, update: ApplianceUpdate },
    ToggleAppliance { id: i64, current: ApplianceStatus },
    DeleteAppliance { id: i64 },
    DeleteUsageLog { id: i64 },
    SimulateData,
    SimulateAlerts,
}

/// Pending destructive action awaiting an explicit yes/no.
/// Declining sends nothing over the network.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteRoom { id: i64, name: String },
    DeleteAppliance { id: i64, name: String },
    DeleteUsageLog { id: i64 },
}

impl ConfirmAction {
    /// The mutation to run if the user confirms.
    pub fn into_mutation(self) -> Mutation {
        match self {
            Self::DeleteRoom { id, .. } => Mutation::DeleteRoom { id },
            Self::DeleteAppliance { id, .. } => Mutation::DeleteAppliance { id },
            Self::DeleteUsageLog { id } => Mutation::DeleteUsageLog { id },
        }
    }
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteRoom { name, .. } => write!(
                f,
                "Delete room {name}? Its appliances and usage logs go with it."
            ),
            Self::DeleteAppliance { name, .. } => {
                write!(f, "Delete appliance {name}? Its usage logs go with it.")
            }
            Self::DeleteUsageLog { id } => write!(f, "Delete usage log #{id}?"),
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Data Events (from the view store, via the data bridge) ────
    StatsUpdated(ViewState<Arc<DashboardStats>>),
    RoomsUpdated(ViewState<Arc<Vec<Room>>>),
    HistoryUpdated(ViewState<Arc<UsageHistory>>),
    ReadingsUpdated(ViewState<Arc<Vec<EnergyReading>>>),
    AlertsUpdated(ViewState<Arc<Vec<Alert>>>),
    DataRefreshed(DateTime<Utc>),

    // ── Mutations ─────────────────────────────────────────────────
    Submit(Mutation),

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
