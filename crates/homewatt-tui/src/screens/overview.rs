//! Overview screen — usage counters, the live chart, and recent alerts.
//!
//! Layout:
//! ┌─ Current ─┐┌─ Today ─┐┌─ Month ─┐┌─ Total ─┐
//! ┌─ Live Usage (chart) ────┐┌─ Readings ──────┐
//! └─────────────────────────┘└─────────────────┘
//! ┌─ Recent Alerts ─────────────────────────────┐

use std::sync::Arc;
use std::time::Instant;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use homewatt_core::{Alert, DashboardStats, EnergyReading, ViewState};

use crate::action::{Action, Mutation};
use crate::component::Component;
use crate::theme;
use crate::widgets::energy_chart::EnergySeries;
use crate::widgets::kwh_fmt;

use super::state_notice;

/// Overview screen state.
pub struct OverviewScreen {
    focused: bool,
    stats: ViewState<Arc<DashboardStats>>,
    readings: ViewState<Arc<Vec<EnergyReading>>>,
    alerts: ViewState<Arc<Vec<Alert>>>,
    /// The one live chart series, replaced wholesale on every refresh.
    series: EnergySeries,
    /// Tracks when data last arrived (for the title-bar age indicator).
    last_data_update: Option<Instant>,
}

impl OverviewScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            stats: ViewState::Loading,
            readings: ViewState::Loading,
            alerts: ViewState::Loading,
            series: EnergySeries::placeholder(),
            last_data_update: None,
        }
    }

    fn refresh_age_str(&self) -> String {
        match self.last_data_update {
            Some(t) => kwh_fmt::fmt_age(t.elapsed().as_secs()),
            None => "no data".into(),
        }
    }

    /// Render the four usage counters as tiles.
    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let tiles: [(&str, fn(&DashboardStats) -> f64); 4] = [
            ("Current", |s| s.current_kwh),
            ("Today", |s| s.today_kwh),
            ("This Month", |s| s.monthly_kwh),
            ("Total", |s| s.total_kwh),
        ];

        let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

        for (i, (title, value)) in tiles.iter().enumerate() {
            let block = Block::default()
                .title(format!(" {title} "))
                .title_style(theme::title_style())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default());
            let inner = block.inner(columns[i]);
            frame.render_widget(block, columns[i]);

            let line = match state_notice(&self.stats) {
                Some(notice) => notice,
                // Absent counters read 0 and render as "0.00 kWh".
                None => {
                    let figure = self.stats.data().map_or(0.0, |s| value(s));
                    Line::from(Span::styled(
                        format!("  {}", kwh_fmt::fmt_kwh(figure)),
                        Style::default()
                            .fg(theme::SKY_BLUE)
                            .add_modifier(Modifier::BOLD),
                    ))
                }
            };
            frame.render_widget(Paragraph::new(vec![Line::from(""), line]), inner);
        }
    }

    /// Render the latest reading per appliance.
    fn render_readings(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Readings ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(notice) = state_notice(&self.readings) {
            frame.render_widget(Paragraph::new(notice), inner);
            return;
        }

        let readings = self.readings.data().cloned().unwrap_or_default();
        if readings.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  No energy readings available",
                    theme::placeholder(),
                ))),
                inner,
            );
            return;
        }

        let max_rows = inner.height as usize;
        let lines: Vec<Line> = readings
            .iter()
            .take(max_rows)
            .map(|r| {
                let name: String = r.appliance.chars().take(14).collect();
                let badge_style = if r.status.is_on() {
                    theme::badge_on()
                } else {
                    theme::badge_off()
                };
                Line::from(vec![
                    Span::styled(format!("  {name:<14}"), theme::row()),
                    Span::styled(format!("{:>10}", kwh_fmt::fmt_kwh(r.power_kwh)), theme::row()),
                    Span::raw(" "),
                    Span::styled(format!("[{}]", r.status.label()), badge_style),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Render the most recent threshold alerts.
    fn render_alerts(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Recent Alerts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(notice) = state_notice(&self.alerts) {
            frame.render_widget(Paragraph::new(notice), inner);
            return;
        }

        let alerts = self.alerts.data().cloned().unwrap_or_default();
        if alerts.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled("  No alerts", theme::placeholder()))),
                inner,
            );
            return;
        }

        let max_rows = inner.height as usize;
        let lines: Vec<Line> = alerts
            .iter()
            .take(max_rows)
            .map(|alert| {
                Line::from(vec![
                    Span::styled(
                        format!("  {}", alert.headline()),
                        Style::default().fg(theme::alert_color(alert.level)),
                    ),
                    Span::styled(
                        format!("  {}", kwh_fmt::fmt_timestamp(alert.timestamp)),
                        theme::key_hint(),
                    ),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for OverviewScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('s') => Ok(Some(Action::Submit(Mutation::SimulateData))),
            KeyCode::Char('b') => Ok(Some(Action::Submit(Mutation::SimulateAlerts))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StatsUpdated(state) => {
                self.stats = state.clone();
                self.last_data_update = Some(Instant::now());
            }
            Action::ReadingsUpdated(state) => {
                // Rebuilding from scratch replaces the previous series; a
                // degraded state falls back to the placeholder point.
                self.series = match state.data() {
                    Some(readings) => EnergySeries::from_readings(readings),
                    None => EnergySeries::placeholder(),
                };
                self.readings = state.clone();
            }
            Action::AlertsUpdated(state) => {
                self.alerts = state.clone();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title_line = Line::from(vec![
            Span::styled(" Energy Dashboard ", theme::title_style()),
            Span::styled(
                format!(" [{}] ", self.refresh_age_str()),
                Style::default().fg(theme::BORDER_GRAY),
            ),
        ]);

        let block = Block::default()
            .title(title_line)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 40 || inner.height < 12 {
            // Minimal mode — just the headline counter
            let figure = self.stats.data().map_or(0.0, |s| s.current_kwh);
            frame.render_widget(
                Paragraph::new(format!("Current: {}", kwh_fmt::fmt_kwh(figure)))
                    .style(theme::row()),
                inner,
            );
            return;
        }

        let sections = Layout::vertical([
            Constraint::Length(4), // stat tiles
            Constraint::Min(8),    // chart + readings
            Constraint::Length(6), // recent alerts
        ])
        .split(inner);

        self.render_stats(frame, sections[0]);

        let middle = Layout::horizontal([Constraint::Min(30), Constraint::Length(34)])
            .split(sections[1]);
        self.series.render(frame, middle[0], "Live Usage");
        self.render_readings(frame, middle[1]);

        self.render_alerts(frame, sections[2]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Overview"
    }
}
