// Rooms and the appliances inside them.

use serde::Serialize;

/// On/off state of an appliance, rendered as a badge.
///
/// The backend spells this several ways ("on", "Active", "Off", ...);
/// parsing is lenient and anything unrecognized reads as off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ApplianceStatus {
    On,
    #[default]
    Off,
}

impl ApplianceStatus {
    /// Parse a wire status string, case-insensitively.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "on" | "active" => Self::On,
            _ => Self::Off,
        }
    }

    /// The opposite state (for the toggle mutation).
    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    /// The value the status-toggle endpoint expects.
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::On => "On",
            Self::Off => "Off",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::On => "On",
            Self::Off => "Off",
        }
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// An appliance with its rating and latest usage figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appliance {
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    pub min_power_watts: f64,
    pub max_power_watts: f64,
    /// Latest reading, server-computed. Zero when the appliance has never
    /// logged usage.
    pub current_usage_kwh: f64,
    pub status: ApplianceStatus,
}

impl Appliance {
    /// "80-250W" rating range for display.
    pub fn rating_label(&self) -> String {
        format!("{:.0}-{:.0}W", self.min_power_watts, self.max_power_watts)
    }
}

/// A room and its appliances, as served by the room-usage endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    /// Server-computed mean power draw of the room's appliances, in watts.
    pub total_power_watts: f64,
    /// Server-computed usage total, in kWh (older backend revisions only).
    pub total_usage_kwh: f64,
    pub appliances: Vec<Appliance>,
}

/// A bare room reference (id + name), for pickers and edit prefill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomRef {
    pub id: i64,
    pub name: String,
}

/// Appliance detail as served by the single-appliance endpoint
/// (no usage figures -- it prefills the edit form).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplianceDetail {
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    pub min_power_watts: f64,
    pub max_power_watts: f64,
    pub room_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_both_generations() {
        assert_eq!(ApplianceStatus::parse("on"), ApplianceStatus::On);
        assert_eq!(ApplianceStatus::parse("Active"), ApplianceStatus::On);
        assert_eq!(ApplianceStatus::parse("Off"), ApplianceStatus::Off);
        assert_eq!(ApplianceStatus::parse("Inactive"), ApplianceStatus::Off);
        assert_eq!(ApplianceStatus::parse(""), ApplianceStatus::Off);
    }

    #[test]
    fn toggle_round_trips() {
        assert_eq!(ApplianceStatus::On.toggled(), ApplianceStatus::Off);
        assert_eq!(ApplianceStatus::Off.toggled().wire_value(), "On");
    }
}
