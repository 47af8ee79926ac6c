//! Ember palette and semantic styling for the dashboard.

use ratatui::style::{Color, Modifier, Style};

use homewatt_core::AlertLevel;

// ── Core Palette ──────────────────────────────────────────────────────

pub const EMBER_ORANGE: Color = Color::Rgb(255, 153, 51); // #ff9933
pub const LEAF_GREEN: Color = Color::Rgb(120, 220, 110); // #78dc6e
pub const SKY_BLUE: Color = Color::Rgb(102, 178, 255); // #66b2ff
pub const SIGNAL_YELLOW: Color = Color::Rgb(240, 219, 79); // #f0db4f
pub const ALERT_RED: Color = Color::Rgb(255, 92, 92); // #ff5c5c

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(198, 201, 209); // #c6c9d1
pub const BORDER_GRAY: Color = Color::Rgb(100, 110, 140); // #646e8c
pub const BG_HIGHLIGHT: Color = Color::Rgb(42, 44, 52); // #2a2c34
pub const BG_DARK: Color = Color::Rgb(28, 30, 38); // #1c1e26

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(EMBER_ORANGE).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(EMBER_ORANGE)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Normal row text.
pub fn row() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Selected / highlighted row.
pub fn row_selected() -> Style {
    Style::default()
        .fg(EMBER_ORANGE)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Active tab in the tab bar.
pub fn tab_active() -> Style {
    Style::default()
        .fg(EMBER_ORANGE)
        .add_modifier(Modifier::BOLD)
}

/// Inactive tab in the tab bar.
pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(SKY_BLUE).add_modifier(Modifier::BOLD)
}

/// On/off status badges.
pub fn badge_on() -> Style {
    Style::default().fg(LEAF_GREEN).add_modifier(Modifier::BOLD)
}

pub fn badge_off() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Severity color for a threshold alert.
pub fn alert_color(level: AlertLevel) -> Color {
    match level {
        AlertLevel::Warning => SIGNAL_YELLOW,
        AlertLevel::High => EMBER_ORANGE,
        AlertLevel::Critical => ALERT_RED,
    }
}

/// Placeholder text for empty/"no data" regions.
pub fn placeholder() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// The login prompt shown when a view is unauthenticated.
pub fn login_prompt() -> Style {
    Style::default().fg(SIGNAL_YELLOW)
}

/// In-place error text for a failed fetch.
pub fn fetch_error() -> Style {
    Style::default().fg(ALERT_RED)
}
