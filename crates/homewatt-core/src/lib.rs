// homewatt-core: Reactive view layer between homewatt-api and consumers (CLI/TUI).

pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod refresh;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{Credentials, DashboardConfig};
pub use controller::Dashboard;
pub use error::CoreError;
pub use refresh::{RefreshSet, View};
pub use store::{ViewState, ViewStore};

// Transport types consumers deal with directly.
pub use homewatt_api::models::{ApplianceUpdate, NewAppliance};
pub use homewatt_api::{FetchOutcome, MutationAck};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Alert, AlertLevel, Appliance, ApplianceDetail, ApplianceStatus, DashboardStats, EnergyReading,
    MonthlyUsage, Room, RoomRef, UsageHistory, UsageLog,
};
