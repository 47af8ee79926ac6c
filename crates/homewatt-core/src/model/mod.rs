// ── Unified domain model ──
//
// Canonical representations of the backend's entities. Wire types from
// `homewatt-api` are converted into these in `convert.rs`; consumers
// (CLI/TUI) only ever see this module. The client never derives aggregates
// itself -- every figure here is carried verbatim from the last fetch.

pub mod alert;
pub mod reading;
pub mod room;
pub mod usage;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use homewatt_core::model::*` gives you everything.

pub use alert::{Alert, AlertLevel};
pub use reading::EnergyReading;
pub use room::{Appliance, ApplianceDetail, ApplianceStatus, Room, RoomRef};
pub use usage::{DashboardStats, MonthlyUsage, UsageHistory, UsageLog};
