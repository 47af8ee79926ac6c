//! Alerts screen — the full threshold alert list.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use homewatt_core::{Alert, ViewState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::kwh_fmt;

use super::state_notice;

/// Alerts screen state.
pub struct AlertsScreen {
    focused: bool,
    alerts: ViewState<Arc<Vec<Alert>>>,
    scroll: usize,
}

impl AlertsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            alerts: ViewState::Loading,
            scroll: 0,
        }
    }
}

impl Component for AlertsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let count = self.alerts.data().map_or(0, |a| a.len());
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = (self.scroll + 1).min(count.saturating_sub(1));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            KeyCode::Char('g') => self.scroll = 0,
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::AlertsUpdated(state) = action {
            self.alerts = state.clone();
            let count = self.alerts.data().map_or(0, |a| a.len());
            self.scroll = self.scroll.min(count.saturating_sub(1));
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Alerts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
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

        // Two lines per alert: headline + timestamp.
        let visible = (inner.height as usize) / 2;
        let lines: Vec<Line> = alerts
            .iter()
            .skip(self.scroll)
            .take(visible)
            .flat_map(|alert| {
                let color = theme::alert_color(alert.level);
                let headline = Style::default().fg(color).add_modifier(Modifier::BOLD);
                [
                    Line::from(Span::styled(format!("  {}", alert.headline()), headline)),
                    Line::from(Span::styled(
                        format!("    {}", kwh_fmt::fmt_timestamp(alert.timestamp)),
                        theme::key_hint(),
                    )),
                ]
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Alerts"
    }
}
