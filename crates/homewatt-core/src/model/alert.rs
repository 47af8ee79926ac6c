// Threshold alerts, read-only and server-generated.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Alert severity.
///
/// Newer backends emit a `level` name ("Warning", "High", "Critical");
/// older ones a Bootstrap class ("warning", "danger"). Both parse here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AlertLevel {
    #[default]
    Warning,
    High,
    Critical,
}

impl AlertLevel {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" | "danger" => Self::High,
            _ => Self::Warning,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Anything above Warning gets the attention-grabbing treatment.
    pub fn is_severe(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// One threshold alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Alert {
    /// The headline users see, e.g. "High Usage Alert: Fridge overuse".
    pub fn headline(&self) -> String {
        format!("{} Usage Alert: {}", self.level.label(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_both_generations() {
        assert_eq!(AlertLevel::parse("High"), AlertLevel::High);
        assert_eq!(AlertLevel::parse("danger"), AlertLevel::High);
        assert_eq!(AlertLevel::parse("warning"), AlertLevel::Warning);
        assert_eq!(AlertLevel::parse("Critical"), AlertLevel::Critical);
        assert_eq!(AlertLevel::parse("???"), AlertLevel::Warning);
    }

    #[test]
    fn headline_format() {
        let alert = Alert {
            level: AlertLevel::High,
            message: "Fridge overuse".into(),
            timestamp: None,
        };
        assert_eq!(alert.headline(), "High Usage Alert: Fridge overuse");
        assert!(alert.level.is_severe());
    }
}
