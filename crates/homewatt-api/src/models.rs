// Wire types for the energy backend's JSON API.
//
// The backend is inconsistent about field presence, field names (two
// frontend generations left two spellings for several fields), and value
// types (numbers sometimes arrive as strings). Every struct here uses
// `#[serde(default)]` liberally, `alias` for the older spellings, and the
// lenient deserializers below so a malformed field degrades to a safe
// default instead of failing the whole payload.

use serde::{Deserialize, Serialize};

// ── Lenient field deserializers ──────────────────────────────────────

pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accept a number, a numeric string, or anything else (→ 0.0).
    pub fn f64_or_zero<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
        Ok(match Option::<Value>::deserialize(de)? {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        })
    }

    /// Accept an integer, a numeric string, or anything else (→ 0).
    pub fn i64_or_zero<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
        Ok(match Option::<Value>::deserialize(de)? {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        })
    }

    /// Accept a string or a number (stringified); anything else is empty.
    pub fn string_or_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
        Ok(match Option::<Value>::deserialize(de)? {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        })
    }
}

// ── Mutation envelope ────────────────────────────────────────────────

/// Standard mutation response: `{"success": bool, "message": "..."}`.
///
/// The alert simulation endpoint additionally reports the usage figure it
/// evaluated; everything else the backend tacks on is ignored.
#[derive(Debug, Deserialize)]
pub struct MutationEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub current_usage: Option<f64>,
}

// ── Dashboard stats ──────────────────────────────────────────────────

/// `GET /api/dashboard-stats` — aggregate kWh counters, all server-computed.
///
/// Older backend revisions emit only a subset; absent counters read 0.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDashboardStats {
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub current_usage: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub today_usage: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub monthly_usage: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_usage: f64,
}

// ── Usage history ────────────────────────────────────────────────────

/// One entry from `GET /api/usage-history`.
///
/// The endpoint has two live shapes: per-log entries
/// (`{id, appliance, energy, duration, timestamp}`) and monthly aggregates
/// (`{month, energy_consumed, timestamp}`). All fields are optional here;
/// classification happens in `homewatt-core`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHistoryEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub appliance: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub energy: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub duration: f64,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub energy_consumed: f64,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub timestamp: String,
}

// ── Rooms & appliances ───────────────────────────────────────────────

/// Bare room row from `GET /api/rooms` (dropdown population) and
/// `GET /api/room-usage/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRoom {
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub room_id: i64,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub room_name: String,
}

/// Room with nested appliances from `GET /api/room-usage`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRoomUsage {
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub room_id: i64,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub room_name: String,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_power: f64,
    #[serde(
        default,
        alias = "total_usage",
        deserialize_with = "lenient::f64_or_zero"
    )]
    pub total_usage_kwh: f64,
    #[serde(default)]
    pub appliances: Vec<RawApplianceUsage>,
}

/// Appliance nested inside a room, with its latest usage reading.
#[derive(Debug, Clone, Deserialize)]
pub struct RawApplianceUsage {
    #[serde(default, alias = "id", deserialize_with = "lenient::i64_or_zero")]
    pub appliance_id: i64,
    #[serde(
        default,
        alias = "name",
        deserialize_with = "lenient::string_or_empty"
    )]
    pub appliance_name: String,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub quantity: i64,
    #[serde(
        default,
        alias = "min_power",
        deserialize_with = "lenient::f64_or_zero"
    )]
    pub min_power_rating_watt: f64,
    #[serde(
        default,
        alias = "max_power",
        deserialize_with = "lenient::f64_or_zero"
    )]
    pub max_power_rating_watt: f64,
    #[serde(
        default,
        alias = "energy_consumed",
        deserialize_with = "lenient::f64_or_zero"
    )]
    pub current_usage: f64,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub status: String,
}

/// Appliance detail from `GET /api/appliance/{id}` (edit-form prefill).
#[derive(Debug, Clone, Deserialize)]
pub struct RawApplianceDetail {
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub appliance_id: i64,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub appliance_name: String,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub min_power_rating_watt: f64,
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub max_power_rating_watt: f64,
    #[serde(default)]
    pub room_id: Option<i64>,
}

// ── Energy readings ──────────────────────────────────────────────────

/// One live reading from `GET /api/energy-readings`.
///
/// Aliases cover the older frontend's `{appliance, energy}` spelling.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEnergyReading {
    #[serde(
        default,
        alias = "appliance",
        deserialize_with = "lenient::string_or_empty"
    )]
    pub appliance_name: String,
    #[serde(
        default,
        alias = "energy",
        deserialize_with = "lenient::f64_or_zero"
    )]
    pub current_power: f64,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub timestamp: String,
}

// ── Alerts ───────────────────────────────────────────────────────────

/// One threshold alert from `GET /api/alerts`.
///
/// Severity arrives either as `level` ("Warning"/"High"/"Critical") or as
/// `type` (a Bootstrap class, "warning"/"danger"); the timestamp as either
/// `timestamp` or `date`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawAlertEntry {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

// ── Mutation request bodies ──────────────────────────────────────────

/// Body for `POST /api/add-appliance` (form-encoded).
#[derive(Debug, Clone, Serialize)]
pub struct NewAppliance {
    pub room_id: i64,
    pub appliance_name: String,
    pub quantity: i64,
    pub min_power_rating_watt: f64,
    pub max_power_rating_watt: f64,
}

/// Body for `POST /api/edit-appliance/{id}` (JSON).
#[derive(Debug, Clone, Serialize)]
pub struct ApplianceUpdate {
    pub appliance_name: String,
    pub quantity: i64,
    pub min_power_rating_watt: f64,
    pub max_power_rating_watt: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_coerce_missing_and_mistyped_fields() {
        let raw: RawDashboardStats =
            serde_json::from_str(r#"{"current_usage": "3.5", "monthly_usage": null}"#)
                .expect("parse");
        assert!((raw.current_usage - 3.5).abs() < f64::EPSILON);
        assert!((raw.monthly_usage).abs() < f64::EPSILON);
        assert!((raw.today_usage).abs() < f64::EPSILON);
        assert!((raw.total_usage).abs() < f64::EPSILON);
    }

    #[test]
    fn appliance_accepts_old_field_spellings() {
        let raw: RawApplianceUsage = serde_json::from_str(
            r#"{"id": 7, "name": "Fridge", "min_power": 80, "max_power": "250", "energy_consumed": 1.25, "status": "on"}"#,
        )
        .expect("parse");
        assert_eq!(raw.appliance_id, 7);
        assert_eq!(raw.appliance_name, "Fridge");
        assert!((raw.max_power_rating_watt - 250.0).abs() < f64::EPSILON);
        assert!((raw.current_usage - 1.25).abs() < f64::EPSILON);
    }

    #[test]
    fn history_entry_absorbs_both_shapes() {
        let log: RawHistoryEntry = serde_json::from_str(
            r#"{"id": 3, "appliance": "Heater", "energy": 2.0, "duration": 1.5, "timestamp": "2024-01-01 10:00:00"}"#,
        )
        .expect("parse");
        assert_eq!(log.id, Some(3));
        assert!(log.month.is_none());

        let monthly: RawHistoryEntry =
            serde_json::from_str(r#"{"month": "Jan 2025", "energy_consumed": 41.2}"#)
                .expect("parse");
        assert_eq!(monthly.month.as_deref(), Some("Jan 2025"));
        assert!(monthly.id.is_none());
    }

    #[test]
    fn reading_accepts_wrong_typed_power() {
        let raw: RawEnergyReading = serde_json::from_str(
            r#"{"appliance_name": "TV", "current_power": {"oops": true}, "status": "Active", "timestamp": "2024-01-01 10:00:00"}"#,
        )
        .expect("parse");
        assert!(raw.current_power.abs() < f64::EPSILON);
    }

    #[test]
    fn envelope_defaults_to_failure() {
        let env: MutationEnvelope = serde_json::from_str(r#"{"message": "nope"}"#).expect("parse");
        assert!(!env.success);
        assert_eq!(env.message.as_deref(), Some("nope"));
    }
}
