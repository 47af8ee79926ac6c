// Usage aggregates and history.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate kWh counters from the dashboard-stats endpoint.
///
/// All four are server-computed; a counter the backend omits reads 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DashboardStats {
    pub current_kwh: f64,
    pub today_kwh: f64,
    pub monthly_kwh: f64,
    pub total_kwh: f64,
}

/// One usage log row: an appliance ran for some hours and consumed energy.
/// Immutable once created, except by delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageLog {
    pub id: i64,
    pub appliance: String,
    pub energy_kwh: f64,
    pub duration_hours: f64,
    pub timestamp: Option<DateTime<Utc>>,
}

/// One month's aggregate from the monthly variant of the history endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyUsage {
    /// Period label as the server renders it, e.g. "Jan 2025".
    pub month: String,
    pub energy_kwh: f64,
}

/// The usage-history endpoint classified into its two live shapes.
///
/// Per-log rows feed the history list; monthly rows feed the usage chart.
/// Either list may be empty depending on the backend revision.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UsageHistory {
    pub logs: Vec<UsageLog>,
    pub monthly: Vec<MonthlyUsage>,
}

impl UsageHistory {
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty() && self.monthly.is_empty()
    }
}
