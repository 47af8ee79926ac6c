//! History screen — usage log list plus the monthly usage chart.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{BarChart, Block, BorderType, Borders, Paragraph};

use homewatt_core::{UsageHistory, ViewState};

use crate::action::{Action, ConfirmAction};
use crate::component::Component;
use crate::theme;
use crate::widgets::kwh_fmt;

use super::state_notice;

/// History screen state.
pub struct HistoryScreen {
    focused: bool,
    history: ViewState<Arc<UsageHistory>>,
    selected: usize,
}

impl HistoryScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            history: ViewState::Loading,
            selected: 0,
        }
    }

    fn log_count(&self) -> usize {
        self.history.data().map_or(0, |h| h.logs.len())
    }

    fn request_delete(&self) -> Option<Action> {
        let log = self.history.data()?.logs.get(self.selected)?;
        Some(Action::ShowConfirm(ConfirmAction::DeleteUsageLog {
            id: log.id,
        }))
    }

    /// Render the per-log list (left panel).
    fn render_logs(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Usage Logs ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(notice) = state_notice(&self.history) {
            frame.render_widget(Paragraph::new(notice), inner);
            return;
        }

        let Some(history) = self.history.data() else {
            return;
        };
        if history.logs.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  No usage history available",
                    theme::placeholder(),
                ))),
                inner,
            );
            return;
        }

        let visible = inner.height.saturating_sub(1) as usize;
        let skip = self.selected.saturating_sub(visible.saturating_sub(1));
        let mut lines: Vec<Line> = history
            .logs
            .iter()
            .enumerate()
            .skip(skip)
            .take(visible)
            .map(|(idx, log)| {
                let style = if idx == self.selected {
                    theme::row_selected()
                } else {
                    theme::row()
                };
                Line::from(vec![
                    Span::styled(format!(" {:<16}", log.appliance), style),
                    Span::styled(format!("{:>10}", kwh_fmt::fmt_kwh(log.energy_kwh)), style),
                    Span::styled(
                        format!("  {:>6}", kwh_fmt::fmt_hours(log.duration_hours)),
                        theme::key_hint(),
                    ),
                    Span::styled(
                        format!("  {}", kwh_fmt::fmt_timestamp(log.timestamp)),
                        theme::key_hint(),
                    ),
                ])
            })
            .collect();
        lines.push(Line::from(Span::styled(
            " j/k move  d delete log",
            theme::key_hint(),
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Render the monthly aggregate chart (right panel).
    fn render_monthly(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Monthly Usage ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(notice) = state_notice(&self.history) {
            frame.render_widget(Paragraph::new(notice), inner);
            return;
        }

        let Some(history) = self.history.data() else {
            return;
        };
        if history.monthly.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  No monthly data",
                    theme::placeholder(),
                ))),
                inner,
            );
            return;
        }

        // Bar heights are whole kWh; the exact figure shows on each bar.
        let bars: Vec<(&str, u64)> = history
            .monthly
            .iter()
            .map(|m| (m.month.as_str(), m.energy_kwh.max(0.0).round() as u64))
            .collect();

        let chart = BarChart::default()
            .data(&bars)
            .bar_width(8)
            .bar_gap(1)
            .bar_style(Style::default().fg(theme::SKY_BLUE))
            .value_style(Style::default().fg(theme::BG_DARK).bg(theme::SKY_BLUE))
            .label_style(theme::key_hint());

        frame.render_widget(chart, inner);
    }
}

impl Component for HistoryScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let count = self.log_count();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if count > 0 {
                    self.selected = (self.selected + 1).min(count - 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Char('g') => self.selected = 0,
            KeyCode::Char('G') => self.selected = count.saturating_sub(1),
            KeyCode::Char('d') => return Ok(self.request_delete()),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::HistoryUpdated(state) = action {
            self.history = state.clone();
            let count = self.log_count();
            if count == 0 {
                self.selected = 0;
            } else if self.selected >= count {
                self.selected = count - 1;
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" History ")
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

        let panels =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(inner);
        self.render_logs(frame, panels[0]);
        self.render_monthly(frame, panels[1]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "History"
    }
}
