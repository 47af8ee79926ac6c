// ── API-to-domain type conversions ──
//
// Bridges raw `homewatt_api` response types into canonical
// `homewatt_core::model` types. Each `From` impl normalizes field names,
// parses timestamp strings into strong types, and fills the safe defaults
// the views rely on: numbers 0, names "Unknown". Defaults are applied
// exactly once, here.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use homewatt_api::models::{
    RawAlertEntry, RawApplianceDetail, RawApplianceUsage, RawDashboardStats, RawEnergyReading,
    RawHistoryEntry, RawRoom, RawRoomUsage,
};

use crate::model::{
    Alert, AlertLevel, Appliance, ApplianceDetail, ApplianceStatus, DashboardStats, EnergyReading,
    MonthlyUsage, Room, RoomRef, UsageHistory, UsageLog,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse the backend's timestamp spellings: `2024-01-01 10:00:00`,
/// a bare date, or RFC 3339. Unparseable values become `None` and render
/// as "Unknown" downstream.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// The display placeholder for missing names.
fn name_or_unknown(raw: String) -> String {
    if raw.trim().is_empty() {
        "Unknown".into()
    } else {
        raw
    }
}

// ── Stats ──────────────────────────────────────────────────────────

impl From<RawDashboardStats> for DashboardStats {
    fn from(s: RawDashboardStats) -> Self {
        Self {
            current_kwh: s.current_usage,
            today_kwh: s.today_usage,
            monthly_kwh: s.monthly_usage,
            total_kwh: s.total_usage,
        }
    }
}

// ── Rooms ──────────────────────────────────────────────────────────

impl From<RawApplianceUsage> for Appliance {
    fn from(a: RawApplianceUsage) -> Self {
        Self {
            id: a.appliance_id,
            name: name_or_unknown(a.appliance_name),
            // The backend treats a missing quantity as a single unit.
            quantity: u32::try_from(a.quantity).ok().filter(|&q| q > 0).unwrap_or(1),
            min_power_watts: a.min_power_rating_watt,
            max_power_watts: a.max_power_rating_watt,
            current_usage_kwh: a.current_usage,
            status: ApplianceStatus::parse(&a.status),
        }
    }
}

impl From<RawRoomUsage> for Room {
    fn from(r: RawRoomUsage) -> Self {
        Self {
            id: r.room_id,
            name: name_or_unknown(r.room_name),
            total_power_watts: r.total_power,
            total_usage_kwh: r.total_usage_kwh,
            appliances: r.appliances.into_iter().map(Appliance::from).collect(),
        }
    }
}

impl From<RawRoom> for RoomRef {
    fn from(r: RawRoom) -> Self {
        Self {
            id: r.room_id,
            name: name_or_unknown(r.room_name),
        }
    }
}

impl From<RawApplianceDetail> for ApplianceDetail {
    fn from(a: RawApplianceDetail) -> Self {
        Self {
            id: a.appliance_id,
            name: name_or_unknown(a.appliance_name),
            quantity: u32::try_from(a.quantity).ok().filter(|&q| q > 0).unwrap_or(1),
            min_power_watts: a.min_power_rating_watt,
            max_power_watts: a.max_power_rating_watt,
            room_id: a.room_id,
        }
    }
}

// ── Usage history ──────────────────────────────────────────────────

/// Classify the endpoint's mixed rows: entries carrying a `month` are
/// monthly aggregates, everything else is a per-appliance log.
impl From<Vec<RawHistoryEntry>> for UsageHistory {
    fn from(entries: Vec<RawHistoryEntry>) -> Self {
        let mut history = UsageHistory::default();
        for entry in entries {
            if let Some(month) = entry.month {
                history.monthly.push(MonthlyUsage {
                    month,
                    energy_kwh: entry.energy_consumed,
                });
            } else {
                history.logs.push(UsageLog {
                    id: entry.id.unwrap_or(0),
                    appliance: name_or_unknown(entry.appliance.unwrap_or_default()),
                    energy_kwh: entry.energy,
                    duration_hours: entry.duration,
                    timestamp: parse_timestamp(&entry.timestamp),
                });
            }
        }
        history
    }
}

// ── Readings ───────────────────────────────────────────────────────

impl From<RawEnergyReading> for EnergyReading {
    fn from(r: RawEnergyReading) -> Self {
        Self {
            appliance: name_or_unknown(r.appliance_name),
            power_kwh: r.current_power,
            status: ApplianceStatus::parse(&r.status),
            timestamp: parse_timestamp(&r.timestamp),
        }
    }
}

// ── Alerts ─────────────────────────────────────────────────────────

impl From<RawAlertEntry> for Alert {
    fn from(a: RawAlertEntry) -> Self {
        // `level` names win over the older Bootstrap-class `type` field.
        let level = a
            .level
            .as_deref()
            .or(a.kind.as_deref())
            .map(AlertLevel::parse)
            .unwrap_or_default();
        let when = a.timestamp.as_deref().or(a.date.as_deref()).unwrap_or("");
        Self {
            level,
            message: name_or_unknown(a.message),
            timestamp: parse_timestamp(when),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_parse_all_spellings() {
        assert!(parse_timestamp("2024-01-01 10:30:00").is_some());
        assert!(parse_timestamp("2024-01-01").is_some());
        assert!(parse_timestamp("2024-01-01T10:30:00Z").is_some());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn appliance_defaults_fill_gaps() {
        let raw: RawApplianceUsage = serde_json::from_str("{}").expect("parse");
        let appliance = Appliance::from(raw);
        assert_eq!(appliance.name, "Unknown");
        assert_eq!(appliance.quantity, 1);
        assert_eq!(appliance.status, ApplianceStatus::Off);
        assert!(appliance.current_usage_kwh.abs() < f64::EPSILON);
    }

    #[test]
    fn history_classifies_mixed_rows() {
        let entries: Vec<RawHistoryEntry> = serde_json::from_str(
            r#"[
                {"id": 1, "appliance": "Heater", "energy": 2.5, "duration": 2.0, "timestamp": "2024-01-01 09:00:00"},
                {"month": "Jan 2024", "energy_consumed": 40.0}
            ]"#,
        )
        .expect("parse");
        let history = UsageHistory::from(entries);
        assert_eq!(history.logs.len(), 1);
        assert_eq!(history.monthly.len(), 1);
        assert_eq!(history.logs[0].appliance, "Heater");
        assert_eq!(history.monthly[0].month, "Jan 2024");
    }

    #[test]
    fn alert_level_prefers_level_over_type() {
        let raw: RawAlertEntry = serde_json::from_str(
            r#"{"level": "Critical", "type": "warning", "message": "x", "date": "2024-01-01"}"#,
        )
        .expect("parse");
        let alert = Alert::from(raw);
        assert_eq!(alert.level, AlertLevel::Critical);
        assert!(alert.timestamp.is_some());
    }
}
