// Live per-appliance energy readings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::room::ApplianceStatus;

/// Latest reading for one appliance, feeding the live chart and the
/// readings list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyReading {
    pub appliance: String,
    pub power_kwh: f64,
    pub status: ApplianceStatus,
    pub timestamp: Option<DateTime<Utc>>,
}
